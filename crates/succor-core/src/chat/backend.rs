//! ChatBackend trait definition.
//!
//! The backend is an opaque HTTP endpoint with a fixed request/response
//! contract; the concrete client lives in succor-infra. Uses native async
//! fn in traits (RPITIT, Rust 2024 edition).

use succor_types::chat::{ChatReply, Message};
use succor_types::error::BackendError;

/// One request/response exchange with the inference backend.
///
/// The request carries the full message history including the just-added
/// user message; the reply carries the assistant's next turn.
pub trait ChatBackend: Send + Sync {
    fn exchange(
        &self,
        messages: &[Message],
    ) -> impl std::future::Future<Output = Result<ChatReply, BackendError>> + Send;
}
