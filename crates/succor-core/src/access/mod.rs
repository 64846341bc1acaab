//! Role-based access policy.

pub mod guard;

pub use guard::{Resource, can_access};
