//! Hashing and token-generation traits.
//!
//! Defined in quill-core so `AuthService` can hash passwords and mint tokens
//! without coupling to a specific algorithm. The Argon2 and OS-random
//! adapters live in quill-infra.

use quill_types::error::AuthError;

/// Password hashing and verification.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing (PHC) string.
    fn hash_password(&self, password: &str) -> Result<String, AuthError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Source of fresh opaque auth token keys.
pub trait TokenGenerator: Send + Sync {
    fn generate_token(&self) -> String;
}
