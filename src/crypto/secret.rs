//! Memoized digest of the access code.

use crate::crypto::digest::{Digest, Hasher};
use crate::GateError;
use once_cell::sync::OnceCell;

/// Lazily computed digest of the configured access code.
///
/// Computed at most once; a failed computation leaves the cell empty so the
/// next verification retries. Once set, the value never changes.
pub struct SecretDigest {
    access_code: &'static str,
    cell: OnceCell<Digest>,
}

impl SecretDigest {
    /// Create an empty cell for `access_code`.
    pub fn new(access_code: &'static str) -> Self {
        Self {
            access_code,
            cell: OnceCell::new(),
        }
    }

    /// Return the cached digest, computing it with `hasher` on first use.
    pub fn get_or_compute(&self, hasher: &dyn Hasher) -> Result<&Digest, GateError> {
        self.cell.get_or_try_init(|| {
            tracing::debug!("computing access code digest");
            hasher.hash(self.access_code)
        })
    }

    /// The digest, if already computed.
    pub fn get(&self) -> Option<&Digest> {
        self.cell.get()
    }
}

impl std::fmt::Debug for SecretDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretDigest")
            .field("computed", &self.cell.get().is_some())
            .finish()
    }
}
