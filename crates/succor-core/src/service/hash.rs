//! CredentialHasher trait for password hashing and verification.
//!
//! Defined in succor-core so the identity store can verify credentials
//! without coupling to a specific algorithm. The `Argon2CredentialHasher`
//! adapter lives in succor-infra.

use succor_types::error::HashError;

/// Abstraction over salted one-way credential hashing.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string.
    fn hash(&self, password: &str) -> Result<String, HashError>;

    /// Verify a plaintext password against a stored hash.
    ///
    /// Returns false for an unparseable hash; verification never fails
    /// loudly enough to leak which part was wrong.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
