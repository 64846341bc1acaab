//! Chat exchange engine: drives the request/response cycle for a single
//! active conversation.
//!
//! The engine owns the transcript and a single in-flight flag; it is
//! stateless with respect to persistence. Writing a completed exchange
//! into a session is the caller's job, which keeps exchange logic
//! independent of the storage scheme.

use tracing::warn;

use succor_types::chat::Message;
use succor_types::error::BackendError;

use crate::chat::backend::ChatBackend;

/// Fixed assistant greeting seeding a fresh transcript.
pub const GREETING: &str = "Hello! I'm Succor, your IT support assistant. \
How can I help you with your technical issue today?";

/// The message pair appended to the transcript by a completed send.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub user: Message,
    pub assistant: Message,
}

/// Drives message exchange for one conversation.
///
/// At most one request is outstanding at a time; a send submitted while
/// one is in flight is rejected, not queued. A failed turn is terminal
/// for that turn -- the engine never retries on its own.
pub struct ChatEngine<B: ChatBackend> {
    backend: B,
    messages: Vec<Message>,
    in_flight: bool,
}

impl<B: ChatBackend> ChatEngine<B> {
    /// Create an engine with a fresh transcript seeded with the greeting.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            messages: vec![Message::assistant(GREETING)],
            in_flight: false,
        }
    }

    /// Create an engine over an existing transcript (a persisted
    /// session's messages). An empty history falls back to the greeting.
    pub fn with_history(backend: B, messages: Vec<Message>) -> Self {
        if messages.is_empty() {
            return Self::new(backend);
        }
        Self {
            backend,
            messages,
            in_flight: false,
        }
    }

    /// The conversation transcript, in append order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether a backend request is currently outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Submit a user turn.
    ///
    /// Returns `None` without any state change when `text` is blank or a
    /// request is already in flight. Otherwise the user message is
    /// appended immediately (it stays visible even if the network call
    /// fails), one request carrying the full history is issued, and the
    /// resulting assistant turn is appended: the reply on success, a
    /// human-readable fallback notice on failure. Failure is never silent
    /// and never propagates out of the engine.
    pub async fn send_message(&mut self, text: &str) -> Option<Exchange> {
        let text = text.trim();
        if text.is_empty() || self.in_flight {
            return None;
        }

        let user = Message::user(text);
        self.messages.push(user.clone());
        self.in_flight = true;

        let assistant = match self.backend.exchange(&self.messages).await {
            Ok(reply) => Message::assistant(reply.message),
            Err(err) => {
                warn!(%err, "chat exchange failed");
                Message::assistant(fallback_notice(&err))
            }
        };

        self.messages.push(assistant.clone());
        self.in_flight = false;
        Some(Exchange { user, assistant })
    }
}

/// Human-readable assistant turn standing in for a failed exchange.
///
/// Distinguishes an unreachable or timed-out backend from generic failure
/// so the transcript stays inspectable.
fn fallback_notice(err: &BackendError) -> String {
    match err {
        BackendError::Unreachable(_) => {
            "I couldn't reach the support backend. Please check that the \
             server is running and try again."
                .to_string()
        }
        BackendError::Timeout => {
            "The support backend took too long to respond. Please try again.".to_string()
        }
        _ => "Sorry, I encountered an error. Please try again.".to_string(),
    }
}
