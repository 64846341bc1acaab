//! Uploaded reference document types for Succor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference document uploaded through the admin surface.
///
/// Content is carried inline as base64 so the whole record is a plain
/// JSON document like everything else in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceDoc {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// Base64-encoded file content.
    pub content: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ReferenceDoc {
    /// Create a new document record stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            content: content.into(),
            uploaded_at: Utc::now(),
        }
    }
}
