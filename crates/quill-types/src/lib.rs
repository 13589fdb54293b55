//! Shared domain types for Quill.
//!
//! This crate contains the core domain types used across the Quill chat
//! backend: users and auth tokens, chat sessions and their exchange log,
//! LLM request/response shapes, configuration, and the error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod user;
