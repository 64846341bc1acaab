//! File-backed key-value store.
//!
//! Implements `KvStore` from succor-core with one pretty-printed JSON
//! document per key at `<dir>/<key>.json`. Writes land in a temp file in
//! the same directory and are renamed into place, so a reader never
//! observes a torn record. There is no cross-process coordination: two
//! processes writing the same key are last-writer-wins.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use succor_core::storage::kv_store::KvStore;
use succor_types::error::StorageError;

/// Filesystem implementation of `KvStore`.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KvStore for FileKvStore {
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let text = match fs::read_to_string(self.path_for(key)) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        let mut tmp =
            NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::Io(e.to_string()))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tmp.persist(self.path_for(key))
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_get_absent_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::new(tmp.path()).unwrap();
        let value: Option<Vec<String>> = store.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_get_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::new(tmp.path()).unwrap();

        store.set("names", &vec!["rosa".to_string()]).unwrap();
        let value: Option<Vec<String>> = store.get("names").unwrap();
        assert_eq!(value.unwrap(), vec!["rosa".to_string()]);
        assert!(tmp.path().join("names.json").exists());
    }

    #[test]
    fn test_overwrite_replaces_record() {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::new(tmp.path()).unwrap();

        store.set("count", &1u32).unwrap();
        store.set("count", &2u32).unwrap();
        let value: Option<u32> = store.get("count").unwrap();
        assert_eq!(value, Some(2));
    }

    #[test]
    fn test_malformed_json_is_corrupt() {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::new(tmp.path()).unwrap();
        fs::write(tmp.path().join("users.json"), "{not json").unwrap();

        let err = store.get::<Vec<String>>("users").unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_remove_deletes_record() {
        let tmp = TempDir::new().unwrap();
        let store = FileKvStore::new(tmp.path()).unwrap();

        store.set("gone", &"soon".to_string()).unwrap();
        store.remove("gone").unwrap();
        assert!(!tmp.path().join("gone.json").exists());

        // Removing again is a no-op.
        store.remove("gone").unwrap();
    }

    #[test]
    fn test_new_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let store = FileKvStore::new(&nested).unwrap();
        store.set("k", &true).unwrap();
        assert!(nested.join("k.json").exists());
    }
}
