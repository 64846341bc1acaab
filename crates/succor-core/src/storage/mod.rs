//! Storage abstractions for Succor.
//!
//! Defines the typed key-value store contract. The file-backed
//! implementation lives in succor-infra; an in-memory implementation is
//! provided here for tests and ephemeral state.

pub mod kv_store;
pub mod memory;

pub use kv_store::KvStore;
pub use memory::MemoryKvStore;
