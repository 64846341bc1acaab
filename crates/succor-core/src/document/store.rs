//! Reference document store.
//!
//! Holds the uploaded reference documents under one global key. Mutation
//! belongs to the admin surface; the access guard gates it at the call
//! site, the same way roster mutation is gated.

use tracing::{info, warn};
use uuid::Uuid;

use succor_types::document::ReferenceDoc;
use succor_types::error::StorageError;

use crate::storage::kv_store::KvStore;

/// Storage key for the uploaded reference documents.
const DOCS_KEY: &str = "reference_docs";

/// Owns the list of uploaded reference documents.
pub struct DocumentStore<K: KvStore> {
    kv: K,
    docs: Vec<ReferenceDoc>,
}

impl<K: KvStore> DocumentStore<K> {
    pub fn new(kv: K) -> Self {
        Self {
            kv,
            docs: Vec::new(),
        }
    }

    /// Load the persisted documents. A corrupt record is discarded and
    /// the list starts empty.
    pub fn load(&mut self) {
        match self.kv.get::<Vec<ReferenceDoc>>(DOCS_KEY) {
            Ok(Some(docs)) => self.docs = docs,
            Ok(None) => self.docs.clear(),
            Err(err) => {
                warn!(%err, "discarding unreadable document list");
                if let Err(err) = self.kv.remove(DOCS_KEY) {
                    warn!(%err, "failed to remove unreadable document list");
                }
                self.docs.clear();
            }
        }
    }

    pub fn docs(&self) -> &[ReferenceDoc] {
        &self.docs
    }

    /// Append an uploaded document and persist the list.
    pub fn add_document(&mut self, doc: ReferenceDoc) -> Result<(), StorageError> {
        info!(doc_id = %doc.id, name = %doc.name, "reference document uploaded");
        self.docs.push(doc);
        self.kv.set(DOCS_KEY, &self.docs)
    }

    /// Remove the identified document and persist. Unknown ids are a
    /// no-op.
    pub fn remove_document(&mut self, id: &Uuid) -> Result<(), StorageError> {
        let before = self.docs.len();
        self.docs.retain(|d| d.id != *id);
        if self.docs.len() == before {
            return Ok(());
        }
        self.kv.set(DOCS_KEY, &self.docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::memory::MemoryKvStore;

    fn doc(name: &str) -> ReferenceDoc {
        ReferenceDoc::new(name, "text/plain", 5, "aGVsbG8=")
    }

    #[test]
    fn test_add_and_reload() {
        let mut store = DocumentStore::new(MemoryKvStore::new());
        store.load();
        store.add_document(doc("faq.txt")).unwrap();

        let DocumentStore { kv, .. } = store;
        let mut reloaded = DocumentStore::new(kv);
        reloaded.load();
        assert_eq!(reloaded.docs().len(), 1);
        assert_eq!(reloaded.docs()[0].name, "faq.txt");
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut store = DocumentStore::new(MemoryKvStore::new());
        store.load();
        store.add_document(doc("faq.txt")).unwrap();
        store.remove_document(&Uuid::now_v7()).unwrap();
        assert_eq!(store.docs().len(), 1);
    }

    #[test]
    fn test_corrupt_list_is_discarded() {
        let kv = MemoryKvStore::new();
        kv.insert_raw(DOCS_KEY, serde_json::json!(123));
        let mut store = DocumentStore::new(kv);
        store.load();
        assert!(store.docs().is_empty());
    }
}
