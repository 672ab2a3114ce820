use std::env;
use std::fmt;

pub const DEFAULT_B2_API_URL: &str = "https://api.backblazeb2.com";
pub const DEFAULT_UPLOAD_FOLDER: &str = "Shelf";
/// 100 MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 104_857_600;

#[derive(Clone)]
pub struct Config {
    pub b2_key_id: String,
    pub b2_app_key: String,
    pub b2_bucket_id: String,
    pub b2_bucket_name: String,
    pub b2_api_url: String,
    pub auth_key: String,
    pub upload_folder: String,
    pub http_timeout_secs: Option<u64>,
    pub max_upload_bytes: usize,
    pub server_port: u16,
}

// Credentials must never reach the logs, so Debug is written by hand.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("b2_key_id", &"<redacted>")
            .field("b2_app_key", &"<redacted>")
            .field("b2_bucket_id", &self.b2_bucket_id)
            .field("b2_bucket_name", &self.b2_bucket_name)
            .field("b2_api_url", &self.b2_api_url)
            .field("auth_key", &"<redacted>")
            .field("upload_folder", &self.upload_folder)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("server_port", &self.server_port)
            .finish()
    }
}

fn required(name: &str) -> Result<String, anyhow::Error> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} must be set", name))
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let http_timeout_secs = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .map(|secs| {
                secs.trim()
                    .parse::<u64>()
                    .map_err(|e| anyhow::anyhow!("Invalid HTTP_TIMEOUT_SECS: {}", e))
            })
            .transpose()?;

        Ok(Config {
            b2_key_id: required("B2_APP_KEY_ID")?,
            b2_app_key: required("B2_APP_KEY")?,
            b2_bucket_id: required("B2_BUCKET_ID")?,
            b2_bucket_name: required("B2_BUCKET_NAME")?,
            b2_api_url: env::var("B2_API_URL")
                .unwrap_or_else(|_| DEFAULT_B2_API_URL.to_string()),
            auth_key: required("AUTH_KEY")?,
            upload_folder: env::var("UPLOAD_FOLDER")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_FOLDER.to_string()),
            http_timeout_secs,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid MAX_UPLOAD_BYTES: {}", e))?,
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT: {}", e))?,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let required = [
            ("B2_APP_KEY_ID", &self.b2_key_id),
            ("B2_APP_KEY", &self.b2_app_key),
            ("B2_BUCKET_ID", &self.b2_bucket_id),
            ("B2_BUCKET_NAME", &self.b2_bucket_name),
            ("AUTH_KEY", &self.auth_key),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("{} must not be empty", name));
            }
        }

        if !self.b2_api_url.starts_with("http://") && !self.b2_api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "B2_API_URL must be an http(s) URL, got {}",
                self.b2_api_url
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_BYTES must be greater than zero"));
        }

        if self.http_timeout_secs == Some(0) {
            return Err(anyhow::anyhow!("HTTP_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn test_config(api_url: &str) -> Config {
    Config {
        b2_key_id: "key-id".to_string(),
        b2_app_key: "app-key".to_string(),
        b2_bucket_id: "bucket-id".to_string(),
        b2_bucket_name: "bucket-name".to_string(),
        b2_api_url: api_url.to_string(),
        auth_key: "secret".to_string(),
        upload_folder: DEFAULT_UPLOAD_FOLDER.to_string(),
        http_timeout_secs: None,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        server_port: 3000,
    }
}
