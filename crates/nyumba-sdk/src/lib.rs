//! # Nyumba SDK
//!
//! Typed client for the Nyumba property management and rental marketplace API.
//!
//! The SDK covers two concerns:
//! - [`client`]: an HTTP client with an injected [`auth::CredentialProvider`]
//!   and typed request/response schemas for every endpoint
//! - [`payment`]: the M-Pesa push-payment flow, from initiation through
//!   status polling to a terminal [`payment::PaymentOutcome`]

pub mod auth;
pub mod client;
pub mod error;
pub mod payment;
pub mod types;

pub use client::{ClientBuilder, NyumbaClient, DEFAULT_API_URL};
pub use error::{ApiError, ErrorResponse, Result};
pub use types::*;
