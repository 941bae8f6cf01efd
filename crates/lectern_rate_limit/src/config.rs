//! Configuration structures for pacing, retries, and the remote client.
//!
//! This module provides TOML-based configuration. The configuration system
//! supports:
//! - Bundled defaults (include_str! from lectern.toml)
//! - User overrides (./lectern.toml or ~/.config/lectern/lectern.toml)
//! - Automatic merging with user values taking precedence

use config::{Config, File, FileFormat};
use lectern_error::{ConfigError, LecternError, LecternResult};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, instrument};

/// Remote endpoint settings.
///
/// ```toml
/// [client]
/// base_url = "https://api.openai.com/v1"
/// default_model = "gpt-3.5-turbo"
/// api_key_env = "OPENAI_API_KEY"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the chat-completions API
    pub base_url: String,

    /// Model used when a caller does not name one
    pub default_model: String,

    /// Environment variable holding the API credential
    pub api_key_env: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            default_model: "gpt-3.5-turbo".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ClientConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Client-side pacing budget.
///
/// ```toml
/// [rate_limit]
/// requests_per_minute = 20
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Requests per minute; request starts are spaced `60 / rpm` seconds apart
    pub requests_per_minute: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 20,
        }
    }
}

/// Retry budget and backoff delays.
///
/// ```toml
/// [retry]
/// max_attempts = 3
/// rate_limit_cooldown_secs = 20
/// connectivity_backoff_secs = 5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Remote calls allowed per dispatch, including the first
    pub max_attempts: u32,

    /// Wait after the endpoint signals throttling
    pub rate_limit_cooldown_secs: u64,

    /// Wait after a network-level failure
    pub connectivity_backoff_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_cooldown_secs: 20,
            connectivity_backoff_secs: 5,
        }
    }
}

impl RetryConfig {
    /// The attempt budget, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `max_attempts` is zero.
    pub fn attempts(&self) -> LecternResult<NonZeroU32> {
        NonZeroU32::new(self.max_attempts).ok_or_else(|| {
            LecternError::from(ConfigError::new("retry.max_attempts must be at least 1"))
        })
    }

    /// Cooldown after a rate-limit signal.
    pub fn rate_limit_cooldown(&self) -> Duration {
        Duration::from_secs(self.rate_limit_cooldown_secs)
    }

    /// Backoff after a connectivity failure.
    pub fn connectivity_backoff(&self) -> Duration {
        Duration::from_secs(self.connectivity_backoff_secs)
    }
}

/// Top-level Lectern configuration.
///
/// Loads settings from TOML files with a precedence system:
/// 1. Bundled defaults (include_str! from lectern.toml)
/// 2. User override (./lectern.toml or ~/.config/lectern/lectern.toml)
///
/// # Example
///
/// ```no_run
/// use lectern_rate_limit::LecternConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LecternConfig::load()?;
/// println!("Pacing at {} requests/minute", config.rate_limit.requests_per_minute);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct LecternConfig {
    /// Remote endpoint settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Pacing budget
    #[serde(default)]
    pub rate_limit: PacingConfig,

    /// Retry budget and delays
    #[serde(default)]
    pub retry: RetryConfig,
}

impl LecternConfig {
    /// Load configuration from a specific file path.
    ///
    /// Sections and keys missing from the file take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> LecternResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                LecternError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LecternError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (lectern.toml shipped with library)
    /// 2. User config in home directory (~/.config/lectern/lectern.toml)
    /// 3. User config in current directory (./lectern.toml)
    ///
    /// User config files are optional and will be silently skipped if not found.
    #[instrument]
    pub fn load() -> LecternResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../lectern.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/lectern/lectern.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("lectern").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                LecternError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                LecternError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the dispatcher cannot run with.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a zero pacing budget or a zero attempt budget.
    pub fn validate(&self) -> LecternResult<()> {
        if self.rate_limit.requests_per_minute == 0 {
            return Err(
                ConfigError::new("rate_limit.requests_per_minute must be at least 1").into(),
            );
        }
        self.retry.attempts()?;
        Ok(())
    }
}
