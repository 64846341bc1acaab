//! Argon2id password hashing.
//!
//! Implements the `CredentialHasher` trait from succor-core using the
//! `argon2` crate (RustCrypto ecosystem). Hashes are salted PHC strings;
//! verification parses the stored string, so parameters can evolve
//! without invalidating existing credentials.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use succor_core::service::hash::CredentialHasher;
use succor_types::error::HashError;

/// Argon2id implementation of `CredentialHasher`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| HashError::HashFailed)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
