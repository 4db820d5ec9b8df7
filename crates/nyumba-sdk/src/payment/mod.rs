//! M-Pesa push-payment flow
//!
//! A payment goes through three stages:
//!
//! 1. [`PaymentInitiator`] asks the backend to push a payment prompt to the
//!    payer's phone and obtains the gateway's checkout request id.
//! 2. [`PaymentStatusPoller`] queries the status of that checkout request on
//!    a fixed interval until it observes a terminal status or runs out of
//!    attempts.
//! 3. The resulting [`PaymentOutcome`] is handed to the front end for display.
//!
//! [`PaymentFlow`] runs the first two stages back to back.

mod attempt;
mod error;
mod flow;
mod initiator;
mod outcome;
mod poller;

pub use attempt::{AttemptStatus, PaymentAttempt};
pub use error::PaymentError;
pub use flow::PaymentFlow;
pub use initiator::{PaymentInitiator, PaymentOrder};
pub use outcome::{PaymentOutcome, PaymentReport};
pub use poller::{Observation, PaymentStatusPoller, PollState, PollerConfig};

use crate::client::NyumbaClient;
use crate::error::Result;
use crate::types::{PayRequest, PayResponse, PaymentStatusResponse};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Backend operations the payment flow depends on
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Trigger a push payment; one outbound request, never retried
    async fn initiate_payment(
        &self,
        request: &PayRequest,
        idempotency_key: &str,
    ) -> Result<PayResponse>;

    /// Look up the status of a previously initiated payment
    async fn payment_status(&self, correlation_id: &str) -> Result<PaymentStatusResponse>;

    /// Amount the account currently owes, used when the payer gives none
    async fn due_balance(&self, account_id: &str) -> Result<Decimal>;
}

#[async_trait]
impl PaymentGateway for NyumbaClient {
    async fn initiate_payment(
        &self,
        request: &PayRequest,
        idempotency_key: &str,
    ) -> Result<PayResponse> {
        NyumbaClient::initiate_payment(self, request, idempotency_key).await
    }

    async fn payment_status(&self, correlation_id: &str) -> Result<PaymentStatusResponse> {
        NyumbaClient::payment_status(self, correlation_id).await
    }

    async fn due_balance(&self, account_id: &str) -> Result<Decimal> {
        Ok(self.get_tenant(account_id).await?.balance_due)
    }
}
