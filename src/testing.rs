//! Substitute hashers and stores for exercising failure paths.

use crate::crypto::digest::{Digest, Hasher, Sha256Hasher};
use crate::storage::FlagStore;
use crate::GateError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Hasher whose primitive is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableHasher;

impl Hasher for UnavailableHasher {
    fn hash(&self, _input: &str) -> Result<Digest, GateError> {
        Err(GateError::EnvironmentUnavailable(
            "SHA-256 not available".to_string(),
        ))
    }
}

/// SHA-256 hasher that counts how often it runs.
#[derive(Debug, Default)]
pub struct CountingHasher {
    calls: AtomicUsize,
}

impl CountingHasher {
    /// Create a hasher with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `hash` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Hasher for CountingHasher {
    fn hash(&self, input: &str) -> Result<Digest, GateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Sha256Hasher.hash(input)
    }
}

/// Store whose reads and/or writes always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore {
    /// Fail `get`.
    pub fail_reads: bool,
    /// Fail `set` and `remove`.
    pub fail_writes: bool,
}

impl FailingStore {
    /// Every operation fails.
    pub fn broken() -> Self {
        Self {
            fail_reads: true,
            fail_writes: true,
        }
    }

    /// Reads succeed (empty), writes fail.
    pub fn read_only() -> Self {
        Self {
            fail_reads: false,
            fail_writes: true,
        }
    }
}

impl FlagStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, GateError> {
        if self.fail_reads {
            return Err(GateError::StorageRead("storage disabled".to_string()));
        }
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), GateError> {
        if self.fail_writes {
            return Err(GateError::StorageWrite("quota exceeded".to_string()));
        }
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), GateError> {
        if self.fail_writes {
            return Err(GateError::StorageWrite("storage disabled".to_string()));
        }
        Ok(())
    }
}
