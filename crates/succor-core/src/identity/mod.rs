//! Identity management for Succor.
//!
//! The identity store owns the user roster and the currently
//! authenticated identity. It performs no authorization of its own;
//! the access guard gates the administrative surface at the call site.

pub mod store;

pub use store::IdentityStore;
