//! Chat session persistence and the generate flow.
//!
//! Defines the `SessionRepository` trait the infrastructure layer implements,
//! the chart shortcut table, and `ChatService` which ties sessions to the
//! completion client.

pub mod repository;
pub mod service;
pub mod shortcut;
