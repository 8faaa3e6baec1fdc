//! CLI configuration.

use anyhow::{Context, Result};
use promptvault_ai::client::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use promptvault_ai::GeminiConfig;
use std::path::PathBuf;
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Database path
    pub db_path: PathBuf,

    /// AI configuration
    pub ai: AiConfig,
}

/// AI configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Gemini API root
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Request timeout
    pub timeout: Duration,

    /// Fallback API key when the user has none
    pub api_key: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./promptvault.db"),
            ai: AiConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                model: DEFAULT_MODEL.to_string(),
                timeout: Duration::from_secs(30),
                api_key: None,
            },
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PROMPTVAULT_DB_PATH`: `SQLite` database path
    /// - `PROMPTVAULT_GEMINI_ENDPOINT`: Gemini API root
    /// - `PROMPTVAULT_GEMINI_MODEL`: Gemini model name
    /// - `PROMPTVAULT_AI_TIMEOUT_SECS`: AI request timeout in seconds
    /// - `GEMINI_API_KEY`: API key used when the user has not stored one
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(db_path) = std::env::var("PROMPTVAULT_DB_PATH") {
            config.db_path = PathBuf::from(db_path);
        }

        if let Ok(endpoint) = std::env::var("PROMPTVAULT_GEMINI_ENDPOINT") {
            config.ai.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("PROMPTVAULT_GEMINI_MODEL") {
            config.ai.model = model;
        }

        if let Ok(secs) = std::env::var("PROMPTVAULT_AI_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .context("Invalid PROMPTVAULT_AI_TIMEOUT_SECS")?;
            config.ai.timeout = Duration::from_secs(secs);
        }

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.ai.api_key = Some(key).filter(|k| !k.trim().is_empty());
        }

        Ok(config)
    }
}

impl AiConfig {
    /// Client configuration, preferring the user's own key.
    #[must_use]
    pub fn gemini(&self, user_key: Option<&str>) -> GeminiConfig {
        GeminiConfig {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            timeout: self.timeout,
            api_key: user_key
                .map(str::to_string)
                .or_else(|| self.api_key.clone()),
        }
    }
}
