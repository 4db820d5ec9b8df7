use crate::types::RemotePaymentStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Client-side view of a payment's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Pending,
    Success,
    Failed,
}

/// Transient mirror of one payment the user started
///
/// The server owns the payment record. This copy lives only as long as the
/// flow that created it and changes only through observed status replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAttempt {
    pub payer_phone: String,
    pub amount: Decimal,
    /// Gateway checkout request id
    pub correlation_id: String,
    pub status: AttemptStatus,
    pub created_at: DateTime<Utc>,
}

impl PaymentAttempt {
    pub fn new(
        payer_phone: impl Into<String>,
        amount: Decimal,
        correlation_id: impl Into<String>,
    ) -> Self {
        Self {
            payer_phone: payer_phone.into(),
            amount,
            correlation_id: correlation_id.into(),
            status: AttemptStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.status != AttemptStatus::Pending
    }

    /// Mirror a status reported by the backend; settled attempts never change
    pub(crate) fn observe(&mut self, status: RemotePaymentStatus) {
        if self.is_settled() {
            return;
        }
        self.status = match status {
            RemotePaymentStatus::Success => AttemptStatus::Success,
            RemotePaymentStatus::Failed | RemotePaymentStatus::Cancelled => AttemptStatus::Failed,
            RemotePaymentStatus::Pending | RemotePaymentStatus::Unknown => AttemptStatus::Pending,
        };
    }
}
