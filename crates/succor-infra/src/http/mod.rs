//! HTTP client for the backend chat endpoint.

pub mod backend;

pub use backend::HttpChatBackend;
