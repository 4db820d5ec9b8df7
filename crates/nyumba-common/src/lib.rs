//! # Nyumba Common
//!
//! Shared building blocks for the Nyumba client crates:
//! - Layered configuration loading (defaults, TOML file, environment)
//! - Unified logging initialization for binaries

pub mod config;
pub mod logging;

pub use config::{ConfigLoader, ConfigurationError};
