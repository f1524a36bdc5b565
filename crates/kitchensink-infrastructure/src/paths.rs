//! Unified path management for client configuration files.
//!
//! All client configuration and the persisted login session live under
//! the platform config directory (e.g. `~/.config/kitchensink/`).

use kitchensink_core::error::{KitchensinkError, Result};
use std::path::PathBuf;

/// Unified path management for the Kitchensink client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/kitchensink/       # Config directory
/// ├── config.toml              # Base URL, API key, timeouts
/// └── session.json             # Persisted login session (token + identity)
/// ```
pub struct KitchensinkPaths;

impl KitchensinkPaths {
    /// Returns the client configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("kitchensink"))
            .ok_or_else(|| KitchensinkError::config("Cannot find config directory"))
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_under_config_dir() {
        let config_dir = KitchensinkPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("kitchensink"));
        let config_file = KitchensinkPaths::config_file().unwrap();
        assert!(config_file.starts_with(&config_dir));
        assert!(config_file.ends_with("config.toml"));
    }

    #[test]
    fn test_session_file_under_config_dir() {
        let session_file = KitchensinkPaths::session_file().unwrap();
        assert!(session_file.ends_with("session.json"));
    }
}
