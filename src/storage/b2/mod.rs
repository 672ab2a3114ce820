//! Backblaze B2 storage through the native API.
//!
//! An upload is three calls: `b2_authorize_account`, `b2_get_upload_url`,
//! then the upload itself. Nothing is cached between uploads, so each
//! `store_file` runs all three.

pub mod authorize;
pub mod upload_file;
pub mod upload_url;
mod wire;

pub use authorize::authorize_account;
pub use upload_file::upload_file;
pub use upload_url::get_upload_url;

use super::backend::StorageBackend;
use crate::config::Config;
use crate::error::MediaError;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

pub struct B2Storage {
    client: reqwest::Client,
    api_url: String,
    key_id: String,
    app_key: String,
    bucket_id: String,
    bucket_name: String,
}

impl B2Storage {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.http_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &Config) -> Self {
        B2Storage {
            client,
            api_url: config.b2_api_url.clone(),
            key_id: config.b2_key_id.clone(),
            app_key: config.b2_app_key.clone(),
            bucket_id: config.b2_bucket_id.clone(),
            bucket_name: config.b2_bucket_name.clone(),
        }
    }

    /// Public download URL of a stored file.
    pub fn generate_url(&self, download_url: &str, stored_file_name: &str) -> String {
        format!(
            "{}/file/{}/{}",
            download_url.trim_end_matches('/'),
            self.bucket_name,
            upload_file::encode_file_name(stored_file_name)
        )
    }
}

#[async_trait]
impl StorageBackend for B2Storage {
    async fn store_file(
        &self,
        bytes: Vec<u8>,
        object_key: &str,
        content_type: Option<&str>,
    ) -> Result<String, MediaError> {
        let session =
            authorize_account(&self.client, &self.api_url, &self.key_id, &self.app_key).await?;
        let target = get_upload_url(&self.client, session, &self.bucket_id).await?;
        let download_url = target.download_url.clone();
        let result = upload_file(&self.client, target, object_key, bytes, content_type).await?;

        Ok(self.generate_url(&download_url, &result.stored_file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn generate_url_joins_download_url_bucket_and_name() {
        let storage = B2Storage::new(&test_config("https://api.example")).unwrap();

        assert_eq!(
            storage.generate_url("https://f001.example/", "Shelf/book.epub"),
            "https://f001.example/file/bucket-name/Shelf/book.epub"
        );
        assert_eq!(
            storage.generate_url("https://f001.example", "Shelf/Café.epub"),
            "https://f001.example/file/bucket-name/Shelf/Caf%C3%A9.epub"
        );
    }

    #[test]
    fn new_applies_timeout_config() {
        let mut config = test_config("https://api.example");
        config.http_timeout_secs = Some(5);
        assert!(B2Storage::new(&config).is_ok());
    }
}
