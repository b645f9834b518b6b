//! Configuration loading and management for ozet.
//!
//! Loads settings from `ozet.toml` with an environment variable override
//! for the API key. Everything has a sensible default, so the config file
//! is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing Google API key: set GOOGLE_API_KEY or [api] google_key in ozet.toml")]
    MissingApiKey,
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 8000;
pub const DEFAULT_TWO_STAGE_THRESHOLD: usize = 70000;

/// Summarisation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Gemini model identifier (e.g., "gemini-2.5-flash-lite")
    pub model: String,
    /// Soft upper bound on chunk size, in characters
    pub max_chunk_chars: usize,
    /// Combined partial-summary length (characters) above which the reduce
    /// stage runs in two passes
    pub two_stage_threshold: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            two_stage_threshold: DEFAULT_TWO_STAGE_THRESHOLD,
        }
    }
}

/// API key configuration (usually supplied through the environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub google_key: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default locations (ozet.toml in cwd or
    /// home), falling back to defaults when no config file exists. The
    /// `GOOGLE_API_KEY` environment variable overrides the configured key.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };

        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            config.api.google_key = Some(key);
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("ozet.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("ozet").join("ozet.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Get the configured API key
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api
            .google_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.agent.model, "gemini-2.5-flash-lite");
        assert_eq!(config.agent.max_chunk_chars, 8000);
        assert_eq!(config.agent.two_stage_threshold, 70000);
        assert!(config.api.google_key.is_none());
    }

    #[test]
    fn load_from_parses_a_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ozet.toml");
        std::fs::write(
            &path,
            "[agent]\nmodel = \"gemini-1.5-pro\"\nmax_chunk_chars = 4000\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.agent.model, "gemini-1.5-pro");
        assert_eq!(config.agent.max_chunk_chars, 4000);
        // Unspecified values keep their defaults
        assert_eq!(config.agent.two_stage_threshold, 70000);
    }

    #[test]
    fn api_key_is_required_and_non_empty() {
        let mut config = Config::default();
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));

        config.api.google_key = Some(String::new());
        assert!(matches!(config.api_key(), Err(ConfigError::MissingApiKey)));

        config.api.google_key = Some("anahtar".to_string());
        assert_eq!(config.api_key().unwrap(), "anahtar");
    }
}
