//! Origin-scoped key-value storage and the persisted access flag.

pub mod file;
pub mod memory;

use crate::GateError;
use std::sync::Arc;

/// Value written under the access key when access is granted.
pub const GRANTED_VALUE: &str = "true";

/// Durable string key-value storage.
pub trait FlagStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, GateError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), GateError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), GateError>;
}

/// The single boolean access flag kept in a [`FlagStore`].
///
/// Only `"true"` counts as granted; any other stored value reads as not
/// granted.
#[derive(Clone)]
pub struct PersistedFlag {
    key: &'static str,
    store: Arc<dyn FlagStore>,
}

impl PersistedFlag {
    /// Bind the flag to `key` in `store`.
    pub fn new(key: &'static str, store: Arc<dyn FlagStore>) -> Self {
        Self { key, store }
    }

    /// Whether the stored value is the granted sentinel.
    pub fn is_granted(&self) -> Result<bool, GateError> {
        let value = self.store.get(self.key)?;
        Ok(value.as_deref() == Some(GRANTED_VALUE))
    }

    /// Record that access was granted.
    pub fn grant(&self) -> Result<(), GateError> {
        self.store.set(self.key, GRANTED_VALUE)
    }

    /// Remove the flag.
    pub fn clear(&self) -> Result<(), GateError> {
        self.store.remove(self.key)
    }
}
