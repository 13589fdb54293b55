//! Repository trait definitions for account persistence.

pub mod user;
