use crate::error::MediaError;
use crate::models::UploadRequest;
use crate::sanitize::sanitize;
use crate::storage::StorageBackend;
use std::sync::Arc;

/// Build the object key `folder/name.ext` for a display name.
///
/// Leading dots on the extension are ignored and an empty extension drops the
/// `.` separator. A folder that is empty after trimming `/` drops the prefix.
pub fn object_key(folder: &str, display_name: &str, extension: &str) -> String {
    let mut key = String::new();

    let folder = folder.trim_matches('/');
    if !folder.is_empty() {
        key.push_str(folder);
        key.push('/');
    }

    key.push_str(&sanitize(display_name));

    let extension = extension.trim().trim_start_matches('.');
    if !extension.is_empty() {
        key.push('.');
        key.push_str(extension);
    }

    key
}

/// Turns an uploaded file into a public URL: sanitize the name, then hand the
/// bytes to the storage backend.
pub struct MediaUrlResolver {
    storage: Arc<dyn StorageBackend>,
    default_folder: String,
}

impl MediaUrlResolver {
    pub fn new(storage: Arc<dyn StorageBackend>, default_folder: impl Into<String>) -> Self {
        MediaUrlResolver {
            storage,
            default_folder: default_folder.into(),
        }
    }

    pub fn default_folder(&self) -> &str {
        &self.default_folder
    }

    /// Upload the request's payload and return its public URL.
    ///
    /// Fails fast: the first failing step's error is returned as is.
    pub async fn resolve(&self, request: UploadRequest) -> Result<String, MediaError> {
        let folder = request.folder.as_deref().unwrap_or(&self.default_folder);
        let key = object_key(folder, &request.display_name, &request.extension);

        tracing::info!("Uploading {} ({} bytes)", key, request.payload.len());

        let url = self
            .storage
            .store_file(request.payload, &key, request.content_type.as_deref())
            .await?;

        tracing::info!("Uploaded {} to {}", key, url);
        Ok(url)
    }
}
