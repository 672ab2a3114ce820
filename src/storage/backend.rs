use crate::error::MediaError;
use async_trait::async_trait;

/// Trait defining the interface for storage backends
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Store `bytes` under `object_key` and return the file's public URL.
    ///
    /// `content_type` of `None` leaves type detection to the backend.
    async fn store_file(
        &self,
        bytes: Vec<u8>,
        object_key: &str,
        content_type: Option<&str>,
    ) -> Result<String, MediaError>;
}
