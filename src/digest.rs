use sha1::{Digest, Sha1};
use std::fmt;

/// Lowercase hex SHA-1 of an upload payload, sent as `X-Bz-Content-Sha1`.
///
/// B2 recomputes the hash over the bytes it receives and rejects the upload on
/// mismatch, so this must be computed over exactly the bytes that are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDigest(String);

impl ContentDigest {
    /// Length of the hex rendering.
    pub const HEX_LEN: usize = 40;

    pub fn compute(payload: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(payload);
        ContentDigest(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
