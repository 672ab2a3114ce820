//! Relay uploaded files into a Backblaze B2 bucket and hand back their public URL.
//!
//! [`media::MediaUrlResolver`] is the entry point: it canonicalizes the display
//! name with [`sanitize::sanitize`] and pushes the bytes through a
//! [`storage::StorageBackend`], which for B2 means authorize, get an upload
//! URL, then upload.

pub mod auth;
pub mod config;
pub mod digest;
pub mod error;
pub mod handlers;
pub mod media;
pub mod models;
pub mod sanitize;
pub mod storage;

pub use config::Config;
pub use digest::ContentDigest;
pub use error::{AuthError, B2Error, MediaError, NegotiationError, UploadError};
pub use media::MediaUrlResolver;
pub use models::UploadRequest;
pub use sanitize::sanitize;
