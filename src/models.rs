use serde::Serialize;
use std::fmt;

/// A file handed to the resolver by the request layer.
#[derive(Debug)]
pub struct UploadRequest {
    pub display_name: String,
    pub extension: String,
    pub payload: Vec<u8>,
    /// Overrides the configured upload folder for this request.
    pub folder: Option<String>,
    /// Sent as the upload `Content-Type`; B2 detects it when absent.
    pub content_type: Option<String>,
}

impl UploadRequest {
    pub fn new(display_name: impl Into<String>, extension: impl Into<String>, payload: Vec<u8>) -> Self {
        UploadRequest {
            display_name: display_name.into(),
            extension: extension.into(),
            payload,
            folder: None,
            content_type: None,
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Result of `b2_authorize_account`. Lives for one upload and is consumed by
/// upload URL negotiation.
pub struct SessionContext {
    pub api_url: String,
    pub authorization_token: String,
    pub download_url: String,
    pub recommended_part_size: u64,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("api_url", &self.api_url)
            .field("authorization_token", &"<redacted>")
            .field("download_url", &self.download_url)
            .field("recommended_part_size", &self.recommended_part_size)
            .finish()
    }
}

/// Result of `b2_get_upload_url`. Good for exactly one upload.
pub struct UploadTarget {
    pub upload_url: String,
    pub authorization_token: String,
    pub download_url: String,
}

impl fmt::Debug for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadTarget")
            .field("upload_url", &self.upload_url)
            .field("authorization_token", &"<redacted>")
            .field("download_url", &self.download_url)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Name B2 stored the file under; not guaranteed to equal the requested key.
    pub stored_file_name: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
        }
    }
}
