//! Client configuration.
//!
//! Loaded from `config.toml` under the platform config directory, with
//! environment variables taking precedence so deployments can override
//! the file without editing it.

use crate::paths::KitchensinkPaths;
use kitchensink_core::error::{KitchensinkError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_BASE_URL: &str = "http://localhost:8081/kitchensink/v1";

/// Connection settings for the Kitchensink REST service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL including the `/kitchensink/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Static API key sent as `X-API-Key` on every request.
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Loads configuration from the default config file, then applies
    /// `KITCHENSINK_BASE_URL` / `KITCHENSINK_API_KEY` overrides.
    pub fn load() -> Result<Self> {
        let path = KitchensinkPaths::config_file()?;
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self {
                base_url: default_base_url(),
                api_key: String::new(),
                timeout_secs: default_timeout_secs(),
            }
        };
        if let Ok(base_url) = std::env::var("KITCHENSINK_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(api_key) = std::env::var("KITCHENSINK_API_KEY") {
            config.api_key = api_key;
        }
        if config.api_key.is_empty() {
            return Err(KitchensinkError::config(
                "API key not configured (set KITCHENSINK_API_KEY or api_key in config.toml)",
            ));
        }
        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| KitchensinkError::config(format!("Failed to read {path:?}: {e}")))?;
        toml::from_str(&raw)
            .map_err(|e| KitchensinkError::config(format!("Failed to parse {path:?}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"k-123\"").unwrap();
        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "k-123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_from_file_full() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://api.example.com/kitchensink/v1\"\napi_key = \"k\"\ntimeout_secs = 5"
        )
        .unwrap();
        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://api.example.com/kitchensink/v1");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [").unwrap();
        assert!(ClientConfig::from_file(file.path()).is_err());
    }
}
