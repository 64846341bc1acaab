//! Shared domain types for Succor.
//!
//! This crate contains the core domain types used across the Succor client:
//! User, ChatSession, Message, the backend wire contract, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod document;
pub mod error;
pub mod user;
