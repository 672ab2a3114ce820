use crate::auth::verify_upload_key;
use crate::config::Config;
use crate::media::MediaUrlResolver;
use crate::models::{ErrorResponse, UploadRequest};
use axum::{
    extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and the small text fields on top of the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<MediaUrlResolver>,
    pub config: Config,
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", post(upload_media))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

fn missing(field: &str) -> Response {
    json_error(
        StatusCode::BAD_REQUEST,
        format!("Missing '{}' parameter.", field),
    )
}

fn required(value: Option<String>, field: &str) -> Result<String, Response> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

struct FilePart {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

#[derive(Default)]
struct UploadForm {
    key: Option<String>,
    name: Option<String>,
    ext: Option<String>,
    file: Option<FilePart>,
}

async fn read_form(multipart: &mut Multipart, max_file_size: usize) -> Result<UploadForm, Response> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        json_error(e.status(), format!("Invalid multipart data: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    json_error(e.status(), format!("Failed to read file: {}", e))
                })?;

                if data.len() > max_file_size {
                    return Err(json_error(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        format!(
                            "File size {} bytes exceeds maximum allowed size of {} bytes",
                            data.len(),
                            max_file_size
                        ),
                    ));
                }

                form.file = Some(FilePart {
                    bytes: data.to_vec(),
                    content_type,
                });
            }
            "key" | "name" | "ext" => {
                let value = field.text().await.map_err(|e| {
                    json_error(e.status(), format!("Failed to read '{}': {}", name, e))
                })?;

                match name.as_str() {
                    "key" => form.key = Some(value),
                    "name" => form.name = Some(value),
                    _ => form.ext = Some(value),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST / - Upload a file to B2 and respond with its public URL
///
/// Multipart fields: `key` (upload key), `name` (display name), `ext`
/// (extension) and `file`.
pub async fn upload_media(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, Response> {
    let content_type = match request.headers().get(header::CONTENT_TYPE) {
        Some(value) => value.to_str().unwrap_or_default().to_string(),
        None => {
            return Err(json_error(
                StatusCode::BAD_REQUEST,
                "Please provide 'content-type' header.",
            ))
        }
    };

    if !content_type.contains("multipart/form-data") {
        return Err(StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response());
    }

    let mut multipart = Multipart::from_request(request, &state)
        .await
        .map_err(|e| json_error(e.status(), format!("Invalid multipart data: {}", e)))?;

    let form = read_form(&mut multipart, state.config.max_upload_bytes).await?;

    let name = required(form.name, "name")?;
    let ext = required(form.ext, "ext")?;
    let file = form
        .file
        .filter(|file| !file.bytes.is_empty())
        .ok_or_else(|| missing("file"))?;

    verify_upload_key(form.key.as_deref(), &state.config.auth_key)
        .map_err(|(status, message)| json_error(status, message))?;

    let mut upload = UploadRequest::new(name, ext, file.bytes);
    if let Some(content_type) = file
        .content_type
        .filter(|ct| ct != "application/octet-stream")
    {
        upload = upload.with_content_type(content_type);
    }

    match state.resolver.resolve(upload).await {
        Ok(url) => Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], url).into_response()),
        Err(e) => {
            tracing::error!("Failed to upload media: {}", e);
            Err(json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
