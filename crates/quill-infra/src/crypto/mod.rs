//! Credential cryptography: Argon2id password hashing and token generation.

pub mod password;
pub mod token;
