//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! Services are generic over repository/hasher traits, but AppState pins them
//! to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use quill_core::auth::service::AuthService;
use quill_core::chat::service::ChatService;
use quill_core::llm::box_provider::BoxLlmProvider;
use quill_core::llm::completion::CompletionClient;
use quill_infra::config::{load_config, resolve_api_key, resolve_data_dir};
use quill_infra::crypto::password::Argon2PasswordHasher;
use quill_infra::crypto::token::RandomTokenGenerator;
use quill_infra::llm::openai_compat::OpenAiCompatibleProvider;
use quill_infra::llm::openai_compat::config::from_completion_config;
use quill_infra::sqlite::pool::DatabasePool;
use quill_infra::sqlite::session::SqliteSessionRepository;
use quill_infra::sqlite::user::SqliteUserRepository;
use quill_types::config::{CompletionConfig, QuillConfig};
use secrecy::SecretString;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAuthService =
    AuthService<SqliteUserRepository, Argon2PasswordHasher, RandomTokenGenerator>;

pub type ConcreteChatService = ChatService<SqliteSessionRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<ConcreteAuthService>,
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<QuillConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let db_pool = DatabasePool::open_in(&data_dir).await?;
        let provider = build_provider(&config.completion);

        tracing::info!(
            data_dir = %data_dir.display(),
            provider = provider.name(),
            model = %config.completion.model,
            "Application state initialized"
        );

        Ok(Self::from_parts(data_dir, db_pool, provider, config))
    }

    /// Wire services from already-constructed parts.
    ///
    /// Used by `init` and by tests that inject a fake provider.
    pub fn from_parts(
        data_dir: PathBuf,
        db_pool: DatabasePool,
        provider: BoxLlmProvider,
        config: QuillConfig,
    ) -> Self {
        let auth_service = AuthService::new(
            SqliteUserRepository::new(db_pool.clone()),
            Argon2PasswordHasher::new(),
            RandomTokenGenerator::new(),
        );

        let completion = CompletionClient::new(
            provider,
            config.completion.model.clone(),
            Duration::from_secs(config.completion.timeout_secs),
        )
        .with_max_tokens(config.completion.max_tokens);

        let chat_service =
            ChatService::new(SqliteSessionRepository::new(db_pool), completion);

        Self {
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            data_dir,
        }
    }
}

/// Build the production completion provider from config and environment.
///
/// A missing key is not fatal: chart shortcuts keep working, keyless
/// compatible servers accept the request, and anything else fails upstream.
fn build_provider(completion: &CompletionConfig) -> BoxLlmProvider {
    let api_key = resolve_api_key(completion).unwrap_or_else(|| {
        tracing::warn!(
            env = %completion.api_key_env,
            "No completion API key set; upstream requests may be rejected"
        );
        SecretString::from(String::new())
    });

    BoxLlmProvider::new(OpenAiCompatibleProvider::new(from_completion_config(
        completion, api_key,
    )))
}
