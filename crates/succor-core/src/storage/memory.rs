//! In-memory key-value store.
//!
//! Backs unit tests and ephemeral state that should not outlive the
//! process. Values are held as `serde_json::Value` so a record written
//! as one type and read as another fails the same way the file store
//! does: as a corrupt record, not a panic.

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use succor_types::error::StorageError;

use crate::storage::kv_store::KvStore;

/// DashMap-backed implementation of [`KvStore`].
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: DashMap<String, serde_json::Value>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw JSON value, bypassing serialization. Lets tests plant
    /// records that will not parse as the expected type.
    pub fn insert_raw(&self, key: &str, value: serde_json::Value) {
        self.entries.insert(key.to_string(), value);
    }

    /// Whether a record exists at `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KvStore for MemoryKvStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.entries.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| StorageError::Corrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value =
            serde_json::to_value(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}
