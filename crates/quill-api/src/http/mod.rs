//! HTTP/REST API layer for Quill.
//!
//! Axum routes for sign-up, login, sentence generation and session history,
//! token authentication, and plain JSON bodies (no envelope).

pub mod body;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
