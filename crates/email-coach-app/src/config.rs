//! Environment-driven client configuration.

use std::env;
use std::time::Duration;

use email_coach_client::BaseUrl;
use thiserror::Error;

/// Backend origin used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
/// Log filter used when neither `RUST_LOG` nor `EMAIL_COACH_LOG` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime configuration for the CLI shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin all endpoint paths are resolved against.
    pub base_url: String,
    /// Per-request deadline. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Fallback `tracing` filter directive.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the environment.
    ///
    /// Loads a `.env` file if present, then reads `EMAIL_COACH_BASE_URL`,
    /// `EMAIL_COACH_TIMEOUT_SECS` and `EMAIL_COACH_LOG`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] for an unusable base URL or timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Self {
            base_url: var_or("EMAIL_COACH_BASE_URL", DEFAULT_BASE_URL),
            timeout: parse_timeout(env::var("EMAIL_COACH_TIMEOUT_SECS").ok().as_deref())?,
            log_level: var_or("EMAIL_COACH_LOG", DEFAULT_LOG_LEVEL),
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the base URL, for example from a command-line flag.
    ///
    /// # Errors
    /// Returns [`ConfigError::BaseUrl`] when the new URL is unusable.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        BaseUrl::parse(&self.base_url)
            .map(|_| ())
            .map_err(|error| ConfigError::BaseUrl(error.to_string()))
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<u64>() {
        Ok(0) => Ok(None),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(_) => Err(ConfigError::Timeout(raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL failed validation.
    #[error("{0}")]
    BaseUrl(String),
    /// Timeout was not a whole number of seconds.
    #[error("invalid EMAIL_COACH_TIMEOUT_SECS: {0}")]
    Timeout(String),
}
