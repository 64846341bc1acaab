//! Infrastructure implementations for Succor.
//!
//! Concrete adapters behind the trait seams defined in succor-core:
//! the file-backed key-value store, the reqwest chat backend client,
//! the Argon2 credential hasher, and configuration loading.

pub mod config;
pub mod crypto;
pub mod http;
pub mod storage;
