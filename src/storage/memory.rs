//! In-process storage backend.

use crate::storage::FlagStore;
use crate::GateError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FlagStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, GateError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| GateError::StorageRead("memory store poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GateError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| GateError::StorageWrite("memory store poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), GateError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| GateError::StorageWrite("memory store poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn with_entry_prepopulates() {
        let store = MemoryStore::with_entry("k", "true");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("true"));
    }
}
