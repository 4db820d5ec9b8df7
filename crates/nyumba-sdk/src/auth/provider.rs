//! Credential provider trait
//!
//! This module defines the seam through which the client obtains the caller's
//! identity for each outbound request.

use super::types::AuthResult;
use async_trait::async_trait;

/// Source of the bearer token attached to outbound requests
#[async_trait]
pub trait CredentialProvider: Send + Sync + std::fmt::Debug {
    /// Current bearer token, or `None` to send the request anonymously
    async fn bearer_token(&self) -> AuthResult<Option<String>>;

    /// Get provider name for logging/debugging
    fn name(&self) -> &str;
}
