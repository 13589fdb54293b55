//! Quill application layer: CLI definitions, HTTP API, and state wiring.
//!
//! Exposed as a library so the router can be driven in-process by the
//! integration tests; the `quill` binary in `main.rs` is a thin shell over it.

pub mod cli;
pub mod http;
pub mod state;
