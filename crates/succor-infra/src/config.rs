//! Configuration loader for Succor.
//!
//! Reads `config.toml` from the data directory (`~/.succor/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to
//! sensible defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default backend chat endpoint.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Environment variable overriding the data directory.
const DATA_DIR_ENV: &str = "SUCCOR_DATA_DIR";

/// Runtime configuration for the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the inference backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
        }
    }
}

/// Resolve the data directory: `$SUCCOR_DATA_DIR` when set, otherwise
/// `~/.succor` (falling back to `.succor` in the working directory when
/// no home directory exists).
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".succor")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: returns [`AppConfig::default()`].
/// - Unreadable or unparseable file: logs a warning and returns the
///   default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.backend_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "backend_url = \"http://support.internal:9000\"\n",
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.backend_url, "http://support.internal:9000");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.backend_url, "http://localhost:8000");
    }
}
