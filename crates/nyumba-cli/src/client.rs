//! CLI-specific client creation
//!
//! The bearer token is read from the environment variable named by
//! `api.token_env` on every request, so a token refreshed by another tool is
//! picked up without restarting a long-running `pay`.

use crate::config::CliConfig;
use crate::error::Result;
use nyumba_sdk::auth::EnvToken;
use nyumba_sdk::{ClientBuilder, NyumbaClient};
use tracing::debug;

/// Creates a NyumbaClient from the effective configuration
pub fn create_client(config: &CliConfig) -> Result<NyumbaClient> {
    debug!(
        base_url = %config.api.base_url,
        token_env = %config.api.token_env,
        "creating API client"
    );

    let client = ClientBuilder::default()
        .base_url(config.api.base_url.clone())
        .timeout(config.api.timeout())
        .connect_timeout(config.api.connect_timeout())
        .credentials(EnvToken::new(config.api.token_env.clone()))
        .build()?;

    Ok(client)
}
