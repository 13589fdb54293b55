//! LLM provider abstraction and the single-prompt completion client.

pub mod box_provider;
pub mod completion;
pub mod provider;
