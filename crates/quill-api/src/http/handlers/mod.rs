//! HTTP request handlers for the REST API.

pub mod auth;
pub mod generate;
pub mod session;
