//! Core state machine for the Succor support-chat client.
//!
//! This crate owns the session and identity logic: credential
//! verification, per-user session ownership, the message-exchange
//! lifecycle against the backend, and the persistence contract around the
//! key-value store. Infrastructure (files, HTTP, Argon2) lives in
//! succor-infra; this crate only defines the trait seams.

pub mod access;
pub mod chat;
pub mod document;
pub mod identity;
pub mod service;
pub mod session;
pub mod storage;
