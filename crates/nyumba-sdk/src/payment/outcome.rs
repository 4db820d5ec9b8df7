use super::attempt::PaymentAttempt;
use serde::{Deserialize, Serialize};

/// Terminal result of polling a payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Gateway confirmed the payment
    Succeeded,
    /// Gateway reported failure or the payer cancelled the prompt
    Failed,
    /// Attempt ceiling reached while the payment was still pending
    TimedOut,
    /// Too many consecutive status queries failed to reach the backend
    Unreachable,
}

impl PaymentOutcome {
    /// Human-readable message shown to the payer
    pub fn message(&self) -> &'static str {
        match self {
            PaymentOutcome::Succeeded => "Payment completed successfully.",
            PaymentOutcome::Failed => {
                "Payment failed or was cancelled. No money was taken; you can try again."
            }
            PaymentOutcome::TimedOut => {
                "Payment is still pending. If you approved the prompt on your phone, \
                 please check again later before paying a second time."
            }
            PaymentOutcome::Unreachable => {
                "Could not reach the payment service to confirm this payment. \
                 Please check your payment history later."
            }
        }
    }
}

impl std::fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentOutcome::Succeeded => "succeeded",
            PaymentOutcome::Failed => "failed",
            PaymentOutcome::TimedOut => "timed_out",
            PaymentOutcome::Unreachable => "unreachable",
        };
        f.write_str(s)
    }
}

/// Everything the front end needs to present a finished payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReport {
    pub outcome: PaymentOutcome,
    pub attempt: PaymentAttempt,
    /// Number of status queries issued
    pub queries: u32,
    /// M-Pesa receipt, when the backend supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
}

impl PaymentReport {
    pub fn message(&self) -> &'static str {
        self.outcome.message()
    }
}
