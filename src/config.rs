//! Configuration loading and management for lexibrief.
//!
//! Loads settings from `lexibrief.toml` with environment variable overrides for sensitive data.
//! The resolved [`Config`] is read once at startup and handed to whoever needs it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default Gemini endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// LLM generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier (e.g., "gemini-3-flash-preview")
    pub model: String,
    /// Sampling temperature; kept low for factual consistency
    pub temperature: f32,
    /// Optional request timeout. Unset means wait for the provider indefinitely.
    pub timeout_secs: Option<u64>,
}

/// Provider access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub gemini_key: Option<String>,
    pub base_url: String,
}

/// Where downloaded briefs are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from `$LEXIBRIEF_CONFIG`, or the default location
    /// (lexibrief.toml in cwd or home).
    ///
    /// A missing file is not an error; defaults plus environment overrides are used.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::find_config_file() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::parse_file(&path)?
            }
            None => Config::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn parse_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Override API keys from environment variables.
    ///
    /// `GEMINI_API_KEY` wins over the generic `API_KEY`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|k| !k.trim().is_empty());
        if let Some(key) = key {
            self.api.gemini_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os("LEXIBRIEF_CONFIG") {
            return Some(PathBuf::from(path));
        }

        // Check current directory
        let local_config = PathBuf::from("lexibrief.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("lexibrief").join("lexibrief.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// The configured API key, or an empty string.
    ///
    /// A missing key is passed through so the provider reports the auth failure.
    pub fn api_key(&self) -> &str {
        self.api.gemini_key.as_deref().unwrap_or_default()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            timeout_secs: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            gemini_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}
