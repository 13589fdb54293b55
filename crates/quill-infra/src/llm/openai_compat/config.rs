//! Configuration for the OpenAI-compatible completion provider.

use quill_types::config::CompletionConfig;
use secrecy::SecretString;

/// Default base URL of the OpenAI API.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name used in logs.
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Model identifier used when a request leaves its model empty.
    pub model: String,
}

/// OpenAI default configuration.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: OPENAI_BASE_URL.into(),
        api_key,
        model: model.into(),
    }
}

/// Build a provider configuration from the `[completion]` config section.
///
/// A base URL other than the OpenAI default is reported as the
/// "openai_compatible" provider.
pub fn from_completion_config(
    completion: &CompletionConfig,
    api_key: SecretString,
) -> OpenAiCompatConfig {
    let base_url = completion.base_url.trim_end_matches('/').to_string();
    let provider_name = if base_url == OPENAI_BASE_URL {
        "openai"
    } else {
        "openai_compatible"
    };

    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url,
        api_key,
        model: completion.model.clone(),
    }
}
