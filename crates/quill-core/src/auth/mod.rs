//! Credential handling: sign-up validation, password hashing and token issue.

pub mod hasher;
pub mod service;
pub mod validation;
