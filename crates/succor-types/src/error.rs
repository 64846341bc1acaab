use thiserror::Error;

/// Errors from persistent key-value storage (used by trait definitions
/// in succor-core).
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(String),

    #[error("corrupt record at key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("failed to serialize record: {0}")]
    Serialize(String),
}

impl StorageError {
    /// Whether this error means the stored record exists but cannot be
    /// parsed. Callers discard such records and fall back to their
    /// initial state.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}

/// Errors from credential hashing.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("credential hashing failed")]
    HashFailed,
}

/// Errors from identity roster operations.
///
/// Credential mismatch is deliberately not an error: `login` reports it
/// as a plain boolean so no account detail leaks to the caller.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from chat session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no authenticated user")]
    Unauthenticated,

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors from the backend chat endpoint.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("invalid response payload: {0}")]
    InvalidResponse(String),

    #[error("request error: {0}")]
    Request(String),
}
