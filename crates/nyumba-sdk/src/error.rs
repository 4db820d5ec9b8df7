//! Error types for the Nyumba SDK

use crate::auth::AuthError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the API client
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Credential provider failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Authentication error (missing, expired or invalid token)
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// Authorization error
    #[error("Authorization error: {message}")]
    Authorization { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Request could not be constructed
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// A required field is missing or malformed
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Timeout error
    #[error("Request timeout")]
    Timeout,

    /// Internal server error
    #[error("Internal server error: {message}")]
    Internal { message: String },

    /// Service unavailable
    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    /// Not found
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Bad request with message
    #[error("Bad request: {message}")]
    BadRequest { message: String },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Build a validation error for a missing required field
    pub fn required(field: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: "is required".to_string(),
        }
    }

    /// Map a transport failure, separating timeouts and refused connections
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::ServiceUnavailable
        } else {
            ApiError::HttpClient(err)
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::HttpClient(_)
                | ApiError::Timeout
                | ApiError::ServiceUnavailable
                | ApiError::RateLimitExceeded
        )
    }
}

/// Error body returned by the backend
///
/// The backend reports errors either as `{"message": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The most specific message the backend provided
    pub fn text(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}
