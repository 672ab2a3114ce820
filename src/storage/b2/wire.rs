//! JSON bodies exchanged with the B2 native API.

use crate::error::B2Error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorizeAccountResponse {
    pub api_url: String,
    pub authorization_token: String,
    pub download_url: String,
    #[serde(default)]
    pub recommended_part_size: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetUploadUrlRequest<'a> {
    pub bucket_id: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetUploadUrlResponse {
    pub upload_url: String,
    pub authorization_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadFileResponse {
    pub file_name: String,
}

/// Error body B2 returns with every non-2xx status.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct B2ErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl B2ErrorBody {
    fn into_error(self, http_status: u16) -> B2Error {
        let code = self.code.unwrap_or_default();
        let message = self
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| code.clone());

        B2Error::Api {
            status: self.status.unwrap_or(http_status),
            code,
            message,
        }
    }
}

/// Read a B2 response: the success body as `T`, anything else as a [`B2Error`].
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, B2Error> {
    let status = response.status().as_u16();
    let success = response.status().is_success();
    let body = response.bytes().await?;

    if !success {
        return Err(match serde_json::from_slice::<B2ErrorBody>(&body) {
            Ok(error_body) => error_body.into_error(status),
            Err(e) => B2Error::Malformed {
                status,
                detail: format!("unreadable error body: {}", e),
            },
        });
    }

    serde_json::from_slice(&body).map_err(|e| B2Error::Malformed {
        status,
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_message_over_code() {
        let body: B2ErrorBody = serde_json::from_str(
            r#"{"status":400,"code":"bad_request","message":"boom"}"#,
        )
        .unwrap();

        match body.into_error(400) {
            B2Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code, "bad_request");
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn error_body_falls_back_to_code_and_http_status() {
        let body: B2ErrorBody =
            serde_json::from_str(r#"{"code":"expired_auth_token","message":""}"#).unwrap();

        let err = body.into_error(401);
        assert_eq!(err.to_string(), "401: expired_auth_token");
    }

    #[test]
    fn authorize_response_parses_b2_shape() {
        let parsed: AuthorizeAccountResponse = serde_json::from_str(
            r#"{
                "accountId": "abc",
                "apiUrl": "https://api001.backblazeb2.com",
                "authorizationToken": "4_token",
                "downloadUrl": "https://f001.backblazeb2.com",
                "recommendedPartSize": 100000000,
                "absoluteMinimumPartSize": 5000000
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.api_url, "https://api001.backblazeb2.com");
        assert_eq!(parsed.recommended_part_size, 100_000_000);
    }

    #[test]
    fn get_upload_url_request_uses_camel_case() {
        let body = serde_json::to_value(GetUploadUrlRequest { bucket_id: "b1" }).unwrap();
        assert_eq!(body, serde_json::json!({ "bucketId": "b1" }));
    }
}
