//! Opaque auth token generation.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use quill_core::auth::hasher::TokenGenerator;

/// Number of random bytes per token; hex-encoded to 40 characters.
const TOKEN_BYTES: usize = 20;

/// Mints tokens from the OS random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl RandomTokenGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for RandomTokenGenerator {
    fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
