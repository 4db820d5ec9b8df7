//! Built-in credential providers

use super::provider::CredentialProvider;
use super::types::{AuthError, AuthResult};
use async_trait::async_trait;
use tracing::debug;

/// Provider that always returns the same token
#[derive(Clone)]
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> AuthResult<Self> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidCredential(
                "bearer token is empty".to_string(),
            ));
        }
        if token.chars().any(char::is_whitespace) {
            return Err(AuthError::InvalidCredential(
                "bearer token contains whitespace".to_string(),
            ));
        }
        Ok(Self {
            token: token.to_string(),
        })
    }
}

// Keep tokens out of debug output
impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticToken").finish_non_exhaustive()
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn bearer_token(&self) -> AuthResult<Option<String>> {
        Ok(Some(self.token.clone()))
    }

    fn name(&self) -> &str {
        "StaticToken"
    }
}

/// Provider that reads the token from an environment variable on every request
///
/// When `required` is false an unset or empty variable means an anonymous
/// request; otherwise it is an error.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
    required: bool,
}

impl EnvToken {
    /// Default variable consulted by the CLI
    pub const DEFAULT_VAR: &'static str = "NYUMBA_ACCESS_TOKEN";

    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Default for EnvToken {
    fn default() -> Self {
        Self::new(Self::DEFAULT_VAR)
    }
}

#[async_trait]
impl CredentialProvider for EnvToken {
    async fn bearer_token(&self) -> AuthResult<Option<String>> {
        match std::env::var(&self.var) {
            Ok(value) if !value.trim().is_empty() => Ok(Some(value.trim().to_string())),
            _ if self.required => Err(AuthError::MissingCredential {
                provider: format!("environment variable {}", self.var),
            }),
            _ => {
                debug!("{} not set, sending request without credentials", self.var);
                Ok(None)
            }
        }
    }

    fn name(&self) -> &str {
        "EnvToken"
    }
}

/// Provider for anonymous access (public listings, inquiries)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

#[async_trait]
impl CredentialProvider for NoCredentials {
    async fn bearer_token(&self) -> AuthResult<Option<String>> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "NoCredentials"
    }
}
