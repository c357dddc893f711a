//! SHA-256 digest computation.

use crate::GateError;
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Parse a hex digest, normalizing it to lowercase.
    ///
    /// Returns `None` unless the input is exactly 64 hex characters.
    pub fn parse(hex_str: &str) -> Option<Self> {
        if hex_str.len() != DIGEST_HEX_LEN || !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(Self(hex_str.to_ascii_lowercase()))
    }

    /// The digest as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One-way hash of a candidate string.
///
/// Implementations must be deterministic. A failure means the primitive
/// itself is unusable and is reported as `EnvironmentUnavailable`.
pub trait Hasher: Send + Sync {
    /// Hash `input` into a digest.
    fn hash(&self, input: &str) -> Result<Digest, GateError>;
}

/// SHA-256 over the UTF-8 bytes of the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(&self, input: &str) -> Result<Digest, GateError> {
        Ok(sha256_hex(input.as_bytes()))
    }
}

/// Compute SHA-256 of `data` as a lowercase hex digest.
pub fn sha256_hex(data: &[u8]) -> Digest {
    Digest(hex::encode(Sha256::digest(data)))
}
