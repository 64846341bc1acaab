//! HttpChatBackend -- concrete [`ChatBackend`] implementation over HTTP.
//!
//! Sends the full conversation to `POST <base_url>/api/chat` and decodes
//! the `{message, is_it_related}` payload. Any non-2xx status or
//! transport error maps to a [`BackendError`]; the engine turns those
//! into fallback assistant turns, so nothing here is fatal to a session.

use std::time::Duration;

use succor_core::chat::backend::ChatBackend;
use succor_types::chat::{ChatReply, ChatTurnRequest, Message, TurnMessage};
use succor_types::error::BackendError;

/// Request timeout. The upstream had none; a hung request would leave the
/// engine in-flight forever, so the transport bounds it here.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of [`ChatBackend`].
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

impl ChatBackend for HttpChatBackend {
    async fn exchange(&self, messages: &[Message]) -> Result<ChatReply, BackendError> {
        let body = ChatTurnRequest {
            messages: messages.iter().map(TurnMessage::from).collect(),
        };

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}

fn map_send_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_connect() {
        BackendError::Unreachable(err.to_string())
    } else {
        BackendError::Request(err.to_string())
    }
}
