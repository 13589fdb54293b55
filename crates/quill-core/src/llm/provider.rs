//! LlmProvider trait definition.
//!
//! This is the abstraction every completion backend implements. Uses RPITIT
//! for `complete`; `BoxLlmProvider` provides the type-erased form held by
//! application state.

use quill_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (OpenAI-compatible APIs, test fakes).
///
/// Implementations live in quill-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
