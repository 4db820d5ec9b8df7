//! Layered configuration loading shared by Nyumba components
//!
//! Every component loads its configuration the same way: serialized defaults,
//! then a TOML file, then environment variables under a component prefix with
//! `__` separating nested keys (e.g. `NYUMBA_API__BASE_URL`).

use etcetera::{choose_base_strategy, BaseStrategy};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine home directory")]
    NoHomeDirectory,
}

/// Loader for configuration types with serializable defaults
pub trait ConfigLoader: Serialize + DeserializeOwned + Default {
    /// Prefix for environment overrides, including the trailing underscore
    const ENV_PREFIX: &'static str;

    /// Load configuration, merging the optional file and environment over defaults
    fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment = figment.merge(Env::prefixed(Self::ENV_PREFIX).split("__"));

        figment.extract().map_err(|e| ConfigurationError::ParseError {
            details: e.to_string(),
        })
    }

    /// Load configuration from a file that must exist
    fn load_from_file(path: &Path) -> Result<Self, ConfigurationError> {
        if !path.exists() {
            return Err(ConfigurationError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
        Self::load(Some(path))
    }

    /// Render the configuration as pretty TOML
    fn to_toml(&self) -> Result<String, ConfigurationError> {
        toml::to_string_pretty(self).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Write the configuration to `path`, creating parent directories
    fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigurationError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_home(path: &Path) -> Result<PathBuf, ConfigurationError> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let strategy =
                choose_base_strategy().map_err(|_| ConfigurationError::NoHomeDirectory)?;
            Ok(strategy.home_dir().join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
