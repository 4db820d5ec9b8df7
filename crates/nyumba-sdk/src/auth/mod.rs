//! Authentication module for the Nyumba SDK
//!
//! The client never reads tokens from ambient storage. Instead a
//! [`CredentialProvider`] is injected at construction time and asked for a
//! bearer token on every request. How the token was obtained (login form,
//! keyring, CI secret) is the caller's business.

pub mod provider;
pub mod providers;
pub mod types;

pub use provider::CredentialProvider;
pub use providers::{EnvToken, NoCredentials, StaticToken};
pub use types::{AuthError, AuthResult};
