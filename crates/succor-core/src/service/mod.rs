//! Service-level trait seams for Succor.

pub mod hash;
