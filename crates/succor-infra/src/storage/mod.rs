//! Durable storage for Succor.

pub mod file_kv;

pub use file_kv::FileKvStore;
