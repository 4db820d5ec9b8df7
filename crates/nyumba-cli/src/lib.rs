//! # Nyumba CLI
//!
//! Command-line front end for the Nyumba rental marketplace.
//!
//! - `nyumba pay`: push an M-Pesa payment prompt, follow its status and
//!   present the outcome
//! - listings, tenants, maintenance, referrals, subscriptions, inquiries and
//!   account settings over the REST API
//! - `nyumba config`: inspect and initialise the layered configuration

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod interactive;
pub mod output;
pub mod progress;

pub use cli::*;
pub use error::*;
