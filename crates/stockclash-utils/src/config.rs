//! Application configuration
//!
//! Values start from built-in defaults and can be overridden through
//! environment variables (a `.env` file in the working directory is honoured).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default Gemini model used for the comparison
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default Yahoo Finance API host
pub const DEFAULT_YAHOO_BASE: &str = "https://query2.finance.yahoo.com";
/// Length at which business summaries are cut
pub const DEFAULT_SUMMARY_LIMIT: usize = 500;

const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MARKET_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Environment variable names
pub mod env {
    pub const MODEL: &str = "STOCKCLASH_MODEL";
    pub const GEMINI_API_BASE: &str = "GEMINI_API_BASE";
    pub const LLM_TIMEOUT_SECS: &str = "STOCKCLASH_LLM_TIMEOUT_SECS";
    pub const YAHOO_BASE: &str = "STOCKCLASH_YAHOO_BASE";
    pub const MARKET_TIMEOUT_SECS: &str = "STOCKCLASH_MARKET_TIMEOUT_SECS";
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was present but could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// The configuration is inconsistent
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM model identifier
    pub model: String,
    /// Base URL of the Gemini API
    pub gemini_api_base: String,
    /// Timeout for the LLM request
    pub llm_timeout: Duration,
    /// Base URL of the Yahoo Finance API
    pub yahoo_base: String,
    /// Timeout for each market-data request
    pub market_timeout: Duration,
    /// User agent sent to the market-data provider
    pub user_agent: String,
    /// Maximum number of characters kept from a business summary
    pub summary_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            yahoo_base: DEFAULT_YAHOO_BASE.to_string(),
            market_timeout: Duration::from_secs(DEFAULT_MARKET_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`, if any)
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(model) = lookup(env::MODEL) {
            config.model = model;
        }
        if let Some(base) = lookup(env::GEMINI_API_BASE) {
            config.gemini_api_base = base;
        }
        if let Some(secs) = lookup(env::LLM_TIMEOUT_SECS) {
            config.llm_timeout = parse_secs(env::LLM_TIMEOUT_SECS, &secs)?;
        }
        if let Some(base) = lookup(env::YAHOO_BASE) {
            config.yahoo_base = base;
        }
        if let Some(secs) = lookup(env::MARKET_TIMEOUT_SECS) {
            config.market_timeout = parse_secs(env::MARKET_TIMEOUT_SECS, &secs)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the LLM model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if self.llm_timeout.is_zero() || self.market_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "timeouts must be greater than 0".to_string(),
            ));
        }
        if self.summary_limit == 0 {
            return Err(ConfigError::Invalid(
                "summary_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        })
}
