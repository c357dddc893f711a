//! File-based storage backend with atomic writes.
//!
//! Stores all entries as one versioned JSON document in
//! `dirs::data_dir()/<namespace>/storage.json`.
//! Uses temp file + rename for atomic writes.

use crate::storage::FlagStore;
use crate::GateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

const STORAGE_FILE: &str = "storage.json";

/// Current storage document version.
pub const STORAGE_VERSION: u32 = 1;

type Entries = BTreeMap<String, String>;

/// On-disk storage document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDocument {
    /// Format version.
    pub version: u32,

    /// Stored key-value entries.
    #[serde(default)]
    pub entries: Entries,
}

impl StorageDocument {
    /// Wrap `entries` in a document of the current version.
    pub fn new(entries: Entries) -> Self {
        Self {
            version: STORAGE_VERSION,
            entries,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, GateError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GateError::StorageWrite(format!("Failed to encode storage: {}", e)))
    }

    /// Parse from JSON, rejecting unknown versions.
    pub fn from_json(json: &str) -> Result<Self, GateError> {
        let document: Self = serde_json::from_str(json)
            .map_err(|e| GateError::StorageRead(format!("Failed to parse storage file: {}", e)))?;

        if document.version != STORAGE_VERSION {
            return Err(GateError::StorageRead(format!(
                "Unsupported storage version: {}",
                document.version
            )));
        }

        Ok(document)
    }
}

/// File-based key-value storage that survives process restarts.
#[derive(Debug)]
pub struct FileStore {
    /// Directory holding the storage file.
    dir: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a file store with the given namespace.
    ///
    /// Storage is kept under `dirs::data_dir()/<namespace>/`.
    pub fn new(namespace: &str) -> Result<Self, GateError> {
        let base_dir = dirs::data_dir()
            .ok_or_else(|| GateError::StorageWrite("Could not find data directory".to_string()))?;

        Self::at(base_dir.join(namespace))
    }

    /// Create a file store in a specific directory.
    pub fn at(dir: PathBuf) -> Result<Self, GateError> {
        fs::create_dir_all(&dir)
            .map_err(|e| GateError::StorageWrite(format!("Failed to create storage dir: {}", e)))?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    /// Temp file private to this process, so concurrent writers never
    /// rename each other's half-written file.
    fn temp_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}.tmp", STORAGE_FILE, std::process::id()))
    }

    fn read_entries(&self) -> Result<Entries, GateError> {
        let path = self.path();

        if !path.exists() {
            return Ok(Entries::new());
        }

        let json = fs::read_to_string(&path)
            .map_err(|e| GateError::StorageRead(format!("Failed to read storage file: {}", e)))?;

        Ok(StorageDocument::from_json(&json)?.entries)
    }

    fn write_entries(&self, entries: Entries) -> Result<(), GateError> {
        let target_path = self.path();
        let temp_path = self.temp_path();

        let json = StorageDocument::new(entries).to_json()?;

        // Write to temp file
        fs::write(&temp_path, json)
            .map_err(|e| GateError::StorageWrite(format!("Failed to write temp file: {}", e)))?;

        // Atomic rename
        fs::rename(&temp_path, &target_path).map_err(|e| {
            GateError::StorageWrite(format!("Failed to rename storage file: {}", e))
        })?;

        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<(), GateError>
    where
        F: FnOnce(&mut Entries) -> bool,
    {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_entries()?;
        if apply(&mut entries) {
            self.write_entries(entries)?;
        }
        Ok(())
    }
}

impl FlagStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, GateError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), GateError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), GateError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}
