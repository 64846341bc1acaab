//! Message-exchange lifecycle against the remote support backend.

pub mod backend;
pub mod engine;

pub use backend::ChatBackend;
pub use engine::{ChatEngine, Exchange};
