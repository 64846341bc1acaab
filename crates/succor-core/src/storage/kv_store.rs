//! Key-value store trait.
//!
//! The only seam through which any component touches raw storage. Records
//! are plain JSON-compatible structured data; there is no versioned
//! schema, so readers must treat absent fields defensively.

use serde::Serialize;
use serde::de::DeserializeOwned;

use succor_types::error::StorageError;

/// Typed key-value persistence contract.
///
/// Storage access is synchronous and runs to completion on the calling
/// turn. `get` distinguishes an absent record (`Ok(None)`) from one that
/// exists but cannot be parsed (`Err(StorageError::Corrupt)`); callers
/// discard corrupt records and fall back to their initial state rather
/// than propagating the parse fault.
pub trait KvStore: Send + Sync {
    /// Read and deserialize the record at `key`. `None` when absent.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError>;

    /// Write the record at `key` (upsert). The write is all-or-nothing:
    /// a concurrent reader sees either the old record or the new one.
    fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError>;

    /// Remove the record at `key`. No-op when absent.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
