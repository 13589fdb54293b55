//! Infrastructure layer for Quill.
//!
//! Contains implementations of the traits defined in `quill-core`: SQLite
//! storage for users, tokens and sessions, Argon2 password hashing, random
//! token generation, the OpenAI-compatible completion provider, and the
//! config file loader.

pub mod config;
pub mod crypto;
pub mod llm;
pub mod sqlite;
