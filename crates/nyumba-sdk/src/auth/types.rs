//! Authentication-related types

use thiserror::Error;

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Credential errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No credential available from {provider}")]
    MissingCredential { provider: String },

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
}
