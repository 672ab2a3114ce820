use super::wire::{read_json, UploadFileResponse};
use crate::digest::ContentDigest;
use crate::error::{B2Error, UploadError};
use crate::models::{UploadResult, UploadTarget};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};

/// Content type that asks B2 to detect the type from the file name.
pub const AUTO_CONTENT_TYPE: &str = "b2/x-auto";
/// Stored as the `author` file info on every upload.
pub const AUTHOR_MARKER: &str = "media-uploader";

pub const FILE_NAME_HEADER: &str = "X-Bz-File-Name";
pub const CONTENT_SHA1_HEADER: &str = "X-Bz-Content-Sha1";
pub const AUTHOR_HEADER: &str = "X-Bz-Info-Author";

/// B2 wants file names percent-encoded; `/` stays as the folder separator.
const FILE_NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode_file_name(name: &str) -> String {
    utf8_percent_encode(name, FILE_NAME_ENCODE_SET).to_string()
}

/// Send `payload` to the negotiated endpoint under `object_key`.
///
/// Consumes the target: an upload URL and its token are used for one file only.
pub async fn upload_file(
    client: &reqwest::Client,
    target: UploadTarget,
    object_key: &str,
    payload: Vec<u8>,
    content_type: Option<&str>,
) -> Result<UploadResult, UploadError> {
    let failed = |source: B2Error| UploadError {
        object_key: object_key.to_string(),
        source,
    };

    let digest = ContentDigest::compute(&payload);
    let size = payload.len();

    let response = client
        .post(&target.upload_url)
        .header(AUTHORIZATION, target.authorization_token.as_str())
        .header(FILE_NAME_HEADER, encode_file_name(object_key))
        .header(CONTENT_TYPE, content_type.unwrap_or(AUTO_CONTENT_TYPE))
        .header(CONTENT_LENGTH, size)
        .header(CONTENT_SHA1_HEADER, digest.as_str())
        .header(AUTHOR_HEADER, AUTHOR_MARKER)
        .body(payload)
        .send()
        .await
        .map_err(|e| failed(e.into()))?;

    let body: UploadFileResponse = read_json(response).await.map_err(|e| {
        tracing::warn!("b2_upload_file failed for {}: {}", object_key, e);
        failed(e)
    })?;

    tracing::debug!(
        "Uploaded {} bytes as {} (sha1 {})",
        size,
        body.file_name,
        digest
    );

    Ok(UploadResult {
        stored_file_name: body.file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const UPLOAD_PATH: &str = "/b2api/v1/b2_upload_file/bucket-1/c001";

    fn target(base: &str) -> UploadTarget {
        UploadTarget {
            upload_url: format!("{}{}", base, UPLOAD_PATH),
            authorization_token: "4_upload".to_string(),
            download_url: "https://f001.example".to_string(),
        }
    }

    #[test]
    fn file_names_keep_folder_separators() {
        assert_eq!(encode_file_name("Shelf/Book-Title.epub"), "Shelf/Book-Title.epub");
        assert_eq!(encode_file_name("Shelf/a b.epub"), "Shelf/a%20b.epub");
        assert_eq!(encode_file_name("Shelf/한.epub"), "Shelf/%ED%95%9C.epub");
    }

    #[tokio::test]
    async fn sends_required_headers_and_returns_stored_name() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", UPLOAD_PATH)
            .match_header("authorization", "4_upload")
            .match_header("x-bz-file-name", "Shelf/Book-Title.epub")
            .match_header("content-type", AUTO_CONTENT_TYPE)
            .match_header("content-length", "10")
            .match_header("x-bz-content-sha1", "5f3dd2485cc60289fbe51c6442d50d1435b99034")
            .match_header("x-bz-info-author", AUTHOR_MARKER)
            .match_body("book bytes")
            .with_status(200)
            .with_body(
                json!({
                    "fileId": "4_z123",
                    "fileName": "Shelf/Book-Title.epub",
                    "contentSha1": "5f3dd2485cc60289fbe51c6442d50d1435b99034"
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = upload_file(
            &reqwest::Client::new(),
            target(&server.url()),
            "Shelf/Book-Title.epub",
            b"book bytes".to_vec(),
            None,
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(result.stored_file_name, "Shelf/Book-Title.epub");
    }

    #[tokio::test]
    async fn forwards_explicit_content_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", UPLOAD_PATH)
            .match_header("content-type", "application/epub+zip")
            .with_status(200)
            .with_body(json!({"fileName": "Shelf/a.epub"}).to_string())
            .create_async()
            .await;

        upload_file(
            &reqwest::Client::new(),
            target(&server.url()),
            "Shelf/a.epub",
            vec![1, 2, 3],
            Some("application/epub+zip"),
        )
        .await
        .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn stored_name_may_differ_from_requested_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", UPLOAD_PATH)
            .with_status(200)
            .with_body(json!({"fileName": "Shelf/a (1).epub"}).to_string())
            .create_async()
            .await;

        let result = upload_file(
            &reqwest::Client::new(),
            target(&server.url()),
            "Shelf/a.epub",
            vec![1],
            None,
        )
        .await
        .unwrap();

        assert_eq!(result.stored_file_name, "Shelf/a (1).epub");
    }

    #[tokio::test]
    async fn checksum_rejection_names_the_object_key() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", UPLOAD_PATH)
            .with_status(400)
            .with_body(
                json!({"status": 400, "code": "bad_request", "message": "Checksum did not match data received"})
                    .to_string(),
            )
            .create_async()
            .await;

        let err = upload_file(
            &reqwest::Client::new(),
            target(&server.url()),
            "Shelf/a.epub",
            vec![1],
            None,
        )
        .await
        .unwrap_err();

        assert_eq!(err.object_key, "Shelf/a.epub");
        assert_eq!(
            err.to_string(),
            "Uploading file to B2 - Shelf/a.epub: 400: Checksum did not match data received"
        );
    }
}
