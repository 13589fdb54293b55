//! Configuration loading for Quill.
//!
//! Resolves the data directory, reads `config.toml` from it into
//! [`QuillConfig`] (falling back to defaults when the file is missing or
//! malformed), and looks up the completion API key in the environment.

use std::path::{Path, PathBuf};

use quill_types::config::{CompletionConfig, QuillConfig};
use secrecy::SecretString;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "QUILL_DATA_DIR";

/// Resolve the data directory: `$QUILL_DATA_DIR`, else `~/.quill`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".quill");
    }

    // Last resort: current directory
    PathBuf::from(".quill")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`QuillConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> QuillConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return QuillConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return QuillConfig::default();
        }
    };

    match toml::from_str::<QuillConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            QuillConfig::default()
        }
    }
}

/// Read the completion API key from the variable named by `api_key_env`.
///
/// Returns `None` when the variable is unset or blank.
pub fn resolve_api_key(completion: &CompletionConfig) -> Option<SecretString> {
    std::env::var(&completion.api_key_env)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}
