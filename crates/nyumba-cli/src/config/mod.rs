//! Configuration management for the Nyumba CLI
//!
//! Values are layered: built-in defaults, then `~/.nyumba/config.toml` (or the
//! file given with `--config`), then `NYUMBA_*` environment variables such as
//! `NYUMBA_API__BASE_URL` or `NYUMBA_PAYMENT__MAX_ATTEMPTS`.

use nyumba_common::config::{expand_home, ConfigLoader};
use nyumba_common::ConfigurationError;
use nyumba_sdk::auth::EnvToken;
use nyumba_sdk::payment::PollerConfig;
use nyumba_sdk::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default location of the CLI configuration file
pub const DEFAULT_CONFIG_PATH: &str = "~/.nyumba/config.toml";

/// CLI configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CliConfig {
    /// API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Payment status polling
    #[serde(default)]
    pub payment: PaymentConfig,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL for the Nyumba API
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Environment variable holding the bearer token
    pub token_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            token_env: EnvToken::DEFAULT_VAR.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Payment status polling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaymentConfig {
    /// Seconds between status queries
    pub poll_interval_secs: u64,

    /// Status queries before reporting the payment as still pending
    pub max_attempts: u32,

    /// Consecutive failed queries before giving up; 0 disables the limit
    pub max_consecutive_errors: u32,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        let poller = PollerConfig::default();
        Self {
            poll_interval_secs: poller.interval.as_secs(),
            max_attempts: poller.max_attempts,
            max_consecutive_errors: poller.max_consecutive_errors.unwrap_or(0),
        }
    }
}

impl PaymentConfig {
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig::default()
            .interval(Duration::from_secs(self.poll_interval_secs))
            .max_attempts(self.max_attempts)
            .max_consecutive_errors(
                (self.max_consecutive_errors > 0).then_some(self.max_consecutive_errors),
            )
    }
}

impl ConfigLoader for CliConfig {
    const ENV_PREFIX: &'static str = "NYUMBA_";
}

impl CliConfig {
    /// Resolve a config path, expanding a leading `~`
    pub fn resolve_path(path: &Path) -> Result<PathBuf, ConfigurationError> {
        expand_home(path)
    }

    /// Load the effective configuration; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigurationError> {
        let path = Self::resolve_path(path)?;
        let config = if path.exists() {
            debug!(path = %path.display(), "loading configuration file");
            Self::load(Some(&path))?
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Self::load(None)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(invalid("api.base_url", "must start with http:// or https://"));
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be greater than zero"));
        }
        if self.api.token_env.trim().is_empty() {
            return Err(invalid("api.token_env", "must name an environment variable"));
        }
        if self.payment.poll_interval_secs == 0 {
            return Err(invalid("payment.poll_interval_secs", "must be greater than zero"));
        }
        if self.payment.max_attempts == 0 {
            return Err(invalid("payment.max_attempts", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
