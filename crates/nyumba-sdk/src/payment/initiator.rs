use super::{PaymentAttempt, PaymentError, PaymentGateway};
use crate::types::PayRequest;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What the payer asked for
#[derive(Debug, Clone)]
pub struct PaymentOrder {
    /// Paying account (tenant id)
    pub sender_id: String,
    pub phone: String,
    /// Explicit amount; `None` pays the account's current balance due
    pub amount: Option<Decimal>,
}

impl PaymentOrder {
    pub fn new(sender_id: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            phone: phone.into(),
            amount: None,
        }
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }
}

/// Starts push payments, at most one at a time
pub struct PaymentInitiator {
    gateway: Arc<dyn PaymentGateway>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the initiation finishes or is dropped
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, PaymentError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PaymentError::InitiationInFlight)?;
        Ok(Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PaymentInitiator {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            gateway,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an initiation is outstanding
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Send one push-payment request and return the attempt to poll
    ///
    /// Never retries; on any error the payer has to resubmit.
    pub async fn initiate(&self, order: &PaymentOrder) -> Result<PaymentAttempt, PaymentError> {
        let phone = order.phone.trim();
        if phone.is_empty() {
            return Err(PaymentError::validation("phone", "is required"));
        }
        let sender_id = order.sender_id.trim();
        if sender_id.is_empty() {
            return Err(PaymentError::validation("sender_id", "is required"));
        }
        if let Some(amount) = order.amount {
            if amount <= Decimal::ZERO {
                return Err(PaymentError::validation("amount", "must be greater than zero"));
            }
        }

        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let amount = match order.amount {
            Some(amount) => amount,
            None => {
                let due = self
                    .gateway
                    .due_balance(sender_id)
                    .await
                    .map_err(PaymentError::Balance)?;
                debug!(%sender_id, %due, "using balance due as payment amount");
                if due <= Decimal::ZERO {
                    return Err(PaymentError::validation("amount", "nothing is due on this account"));
                }
                due
            }
        };

        let request = PayRequest {
            sender_id: sender_id.to_string(),
            phone: phone.to_string(),
            amount,
        };
        let idempotency_key = Uuid::new_v4().to_string();

        info!(%sender_id, %amount, %idempotency_key, "initiating push payment");
        let response = self
            .gateway
            .initiate_payment(&request, &idempotency_key)
            .await
            .map_err(|e| {
                warn!(%sender_id, error = %e, "payment initiation failed");
                PaymentError::Initiation(e)
            })?;

        let mpesa = response.mpesa_res.ok_or(PaymentError::MissingCorrelationId)?;
        if !mpesa.is_accepted() {
            let message = mpesa.rejection_reason();
            warn!(%sender_id, %message, "gateway rejected push payment");
            return Err(PaymentError::Rejected { message });
        }
        let correlation_id = mpesa
            .correlation_id()
            .ok_or(PaymentError::MissingCorrelationId)?;

        info!(%correlation_id, "push payment accepted, awaiting confirmation");
        Ok(PaymentAttempt::new(phone, amount, correlation_id))
    }
}
