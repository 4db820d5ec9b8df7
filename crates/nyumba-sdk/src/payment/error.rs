use crate::error::ApiError;
use thiserror::Error;

/// Errors that end a payment flow before a terminal outcome is reached
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Input rejected before any request was made
    #[error("{field} {message}")]
    Validation { field: String, message: String },

    /// The initiation request itself failed (network or backend error)
    #[error("Could not start the payment: {0}")]
    Initiation(#[source] ApiError),

    /// The gateway refused to push the payment prompt
    #[error("Payment request was rejected: {message}")]
    Rejected { message: String },

    /// No checkout request id to poll with
    #[error("Payment service did not return a checkout request id")]
    MissingCorrelationId,

    /// Another initiation from the same initiator is still outstanding
    #[error("A payment request is already in progress")]
    InitiationInFlight,

    /// Could not look up the amount due for the account
    #[error("Could not determine the amount due: {0}")]
    Balance(#[source] ApiError),

    /// Poller settings that cannot produce a valid schedule
    #[error("Invalid poller setting {field}: {message}")]
    InvalidConfig { field: String, message: String },

    /// The flow was torn down before a terminal state
    #[error("Payment was cancelled before it completed")]
    Cancelled,
}

impl PaymentError {
    pub(crate) fn validation(field: &str, message: &str) -> Self {
        PaymentError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn invalid_config(field: &str, message: &str) -> Self {
        PaymentError::InvalidConfig {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Whether the user can fix this by resubmitting (possibly with new input)
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PaymentError::MissingCorrelationId | PaymentError::InvalidConfig { .. }
        )
    }
}
