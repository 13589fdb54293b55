//! Single-prompt completion client.
//!
//! Wraps a user's words in the sentence-generation prompt, sends one user
//! message to the configured provider with a fixed model, and bounds the call
//! with a timeout. Every failure mode collapses into
//! [`CompletionError::UpstreamFailure`]; nothing is retried.

use std::time::{Duration, Instant};

use quill_types::error::CompletionError;
use quill_types::llm::CompletionRequest;
use tracing::{debug, warn};

use super::box_provider::BoxLlmProvider;

/// Build the prompt sent upstream for a user's input.
pub fn sentence_prompt(input: &str) -> String {
    format!("generate a sentence with {input} these words")
}

/// Outbound client for the text-completion service.
pub struct CompletionClient {
    provider: BoxLlmProvider,
    model: String,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: None,
            timeout,
        }
    }

    /// Cap the number of generated tokens.
    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_request(&self, input: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: sentence_prompt(input),
            max_tokens: self.max_tokens,
        }
    }

    /// Generate text for `input`.
    pub async fn complete(&self, input: &str) -> Result<String, CompletionError> {
        let request = self.build_request(input);
        let start = Instant::now();

        let response = tokio::time::timeout(self.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| {
                warn!(
                    provider = self.provider.name(),
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Completion request timed out"
                );
                CompletionError::UpstreamFailure(format!(
                    "no response within {:.1}s",
                    self.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| {
                warn!(provider = self.provider.name(), error = %e, "Completion request failed");
                CompletionError::UpstreamFailure(e.to_string())
            })?;

        debug!(
            provider = self.provider.name(),
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Completion received"
        );

        match response.content {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(CompletionError::UpstreamFailure(
                "invalid completion response: no content".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::LlmProvider;
    use quill_types::llm::{CompletionResponse, LlmError, Usage};

    // --- Mock providers ---

    enum MockResult {
        Text(Option<&'static str>),
        Error,
        Hang,
    }

    struct MockProvider {
        result: MockResult,
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            match self.result {
                MockResult::Text(content) => Ok(CompletionResponse {
                    id: "cmpl-1".to_string(),
                    content: content.map(|c| format!("{c} [{}]", request.prompt)),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                MockResult::Error => Err(LlmError::Provider {
                    message: "connection refused".to_string(),
                }),
                MockResult::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(LlmError::Overloaded("late".to_string()))
                }
            }
        }
    }

    fn client(result: MockResult) -> CompletionClient {
        CompletionClient::new(
            BoxLlmProvider::new(MockProvider { result }),
            "gpt-4o-mini",
            Duration::from_millis(200),
        )
    }

    #[test]
    fn test_sentence_prompt() {
        assert_eq!(
            sentence_prompt("apple, river"),
            "generate a sentence with apple, river these words"
        );
    }

    #[test]
    fn test_build_request_uses_fixed_model() {
        let client = client(MockResult::Error).with_max_tokens(Some(64));
        let request = client.build_request("sun");
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, Some(64));
        assert_eq!(
            request.prompt,
            "generate a sentence with sun these words"
        );
    }

    #[tokio::test]
    async fn test_complete_returns_text() {
        let text = client(MockResult::Text(Some("A sunny day.")))
            .complete("sun")
            .await
            .unwrap();
        assert!(text.starts_with("A sunny day."));
        assert!(text.contains("generate a sentence with sun these words"));
    }

    #[tokio::test]
    async fn test_complete_provider_error_is_upstream_failure() {
        let err = client(MockResult::Error).complete("sun").await.unwrap_err();
        let CompletionError::UpstreamFailure(msg) = err;
        assert!(msg.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_complete_missing_content_is_upstream_failure() {
        let err = client(MockResult::Text(None)).complete("sun").await.unwrap_err();
        let CompletionError::UpstreamFailure(msg) = err;
        assert!(msg.contains("no content"));
    }

    #[tokio::test]
    async fn test_complete_timeout_is_upstream_failure() {
        let err = client(MockResult::Hang).complete("sun").await.unwrap_err();
        let CompletionError::UpstreamFailure(msg) = err;
        assert!(msg.contains("no response within"));
    }
}
