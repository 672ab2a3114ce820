//! Error types for the B2 upload pipeline.
//!
//! Each step has its own error type whose message starts with the operation
//! that failed. The cause underneath is always a [`B2Error`], so callers can
//! tell a backend rejection (with B2's status and message) apart from a
//! transport failure.

/// What went wrong while talking to B2, independent of the step.
#[derive(Debug, thiserror::Error)]
pub enum B2Error {
    /// B2 answered with a non-success status and an error body.
    #[error("{status}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
    /// The request never produced a usable response: connect, TLS, timeout, body read.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The response body did not have the expected shape.
    #[error("malformed response (HTTP {status}): {detail}")]
    Malformed { status: u16, detail: String },
}

impl B2Error {
    /// HTTP status reported by B2, when there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            B2Error::Api { status, .. } | B2Error::Malformed { status, .. } => Some(*status),
            B2Error::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, B2Error::Transport(_))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Getting B2 authentication keys: {0}")]
pub struct AuthError(#[source] pub B2Error);

#[derive(Debug, thiserror::Error)]
#[error("Getting B2 upload URL: {0}")]
pub struct NegotiationError(#[source] pub B2Error);

#[derive(Debug, thiserror::Error)]
#[error("Uploading file to B2 - {object_key}: {source}")]
pub struct UploadError {
    pub object_key: String,
    #[source]
    pub source: B2Error,
}

/// Failure of a full resolve call. The variant names the step that failed.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error(transparent)]
    Authorize(#[from] AuthError),
    #[error(transparent)]
    Negotiate(#[from] NegotiationError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// The storage backend could not be constructed or used at all.
    #[error("Storage backend unavailable: {0}")]
    Backend(String),
}

impl MediaError {
    /// The B2-level cause, if the failure came from a pipeline step.
    pub fn cause(&self) -> Option<&B2Error> {
        match self {
            MediaError::Authorize(e) => Some(&e.0),
            MediaError::Negotiate(e) => Some(&e.0),
            MediaError::Upload(e) => Some(&e.source),
            MediaError::Backend(_) => None,
        }
    }
}
