//! Error types for the Nyumba CLI

use color_eyre::eyre::{eyre, Report};
use std::path::PathBuf;
use thiserror::Error;

/// CLI error type with minimal variants
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file issues
    #[error("Configuration error: {0}")]
    Config(#[from] nyumba_common::ConfigurationError),

    /// API communication errors
    #[error("API error: {0}")]
    Api(#[from] nyumba_sdk::ApiError),

    /// Payment flow ended without an outcome
    #[error(transparent)]
    Payment(#[from] nyumba_sdk::payment::PaymentError),

    /// A payload file could not be read or parsed
    #[error("Invalid input file {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    /// Prompt failed or the user backed out
    #[error("{0}")]
    Interactive(String),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Everything else (using color-eyre's Report for rich errors)
    #[error(transparent)]
    Internal(#[from] Report),
}

impl CliError {
    pub fn internal(message: impl std::fmt::Display) -> Self {
        CliError::Internal(eyre!("{}", message))
    }

    pub fn interactive(message: impl Into<String>) -> Self {
        CliError::Interactive(message.into())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
