use super::wire::{read_json, GetUploadUrlRequest, GetUploadUrlResponse};
use crate::error::NegotiationError;
use crate::models::{SessionContext, UploadTarget};
use reqwest::header::AUTHORIZATION;

pub const GET_UPLOAD_URL_PATH: &str = "/b2api/v1/b2_get_upload_url";

/// Ask B2 for an upload endpoint in `bucket_id`.
///
/// Consumes the session: a session is never reused for a second negotiation.
pub async fn get_upload_url(
    client: &reqwest::Client,
    session: SessionContext,
    bucket_id: &str,
) -> Result<UploadTarget, NegotiationError> {
    let url = format!("{}{}", session.api_url.trim_end_matches('/'), GET_UPLOAD_URL_PATH);

    let response = client
        .post(&url)
        .header(AUTHORIZATION, session.authorization_token.as_str())
        .json(&GetUploadUrlRequest { bucket_id })
        .send()
        .await
        .map_err(|e| NegotiationError(e.into()))?;

    let body: GetUploadUrlResponse = read_json(response).await.map_err(|e| {
        tracing::warn!("b2_get_upload_url failed: {}", e);
        NegotiationError(e)
    })?;

    tracing::debug!("Negotiated upload endpoint {}", body.upload_url);

    Ok(UploadTarget {
        upload_url: body.upload_url,
        authorization_token: body.authorization_token,
        download_url: session.download_url,
    })
}
