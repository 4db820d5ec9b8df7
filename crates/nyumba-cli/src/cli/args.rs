use crate::cli::{commands::Commands, handlers};
use crate::config::{CliConfig, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use clap::Parser;
use clap_verbosity_flag::{OffLevel, Verbosity};
use std::path::PathBuf;

/// Nyumba CLI - rentals, tenants and M-Pesa payments
#[derive(Parser, Debug)]
#[command(
    name = "nyumba",
    author = "Nyumba Team",
    version,
    about = "Nyumba CLI - rentals, tenants and M-Pesa payments",
    long_about = "Command-line client for the Nyumba property marketplace.

PAYMENTS:
  nyumba pay --tenant <id> --phone 2547XXXXXXXX   # Pay the balance due
  nyumba pay --tenant <id> --amount 25000        # Pay a specific amount
  nyumba payment status <reference>              # Check a payment

PROPERTIES:
  nyumba listings ls --location Kilimani         # Browse listings
  nyumba tenants ls                              # Tenants and balances
  nyumba maintenance ls                          # Maintenance requests

CONFIGURATION:
  nyumba config init                             # Write default config
  nyumba config show                             # Show effective config"
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<OffLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let config_path = CliConfig::resolve_path(&self.config)?;
        let json = self.json;
        // `config` must work even when the file on disk is broken
        let load = || CliConfig::load_from(&config_path);

        match self.command {
            Commands::Config { action } => {
                handlers::config::handle_config(action, &config_path, json)
            }
            Commands::Pay { options } => handlers::pay::handle_pay(options, &load()?, json).await,
            Commands::Payment { action } => {
                handlers::pay::handle_payment(action, &load()?, json).await
            }
            Commands::Listings { action } => {
                handlers::listings::handle_listings(action, &load()?, json).await
            }
            Commands::Tenants { action } => {
                handlers::tenants::handle_tenants(action, &load()?, json).await
            }
            Commands::Maintenance { action } => {
                handlers::maintenance::handle_maintenance(action, &load()?, json).await
            }
            Commands::Referrals { action } => {
                handlers::account::handle_referrals(action, &load()?, json).await
            }
            Commands::Subscriptions { action } => {
                handlers::account::handle_subscriptions(action, &load()?, json).await
            }
            Commands::Inquire { options } => {
                handlers::listings::handle_inquire(options, &load()?, json).await
            }
            Commands::Settings { action } => {
                handlers::account::handle_settings(action, &load()?, json).await
            }
        }
    }
}
