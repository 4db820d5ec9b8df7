use super::{
    PaymentError, PaymentGateway, PaymentInitiator, PaymentOrder, PaymentReport,
    PaymentStatusPoller, PollState, PollerConfig,
};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Initiation followed by status polling against one gateway
pub struct PaymentFlow {
    initiator: PaymentInitiator,
    poller: PaymentStatusPoller,
    cancel: CancellationToken,
}

impl PaymentFlow {
    pub fn new(gateway: Arc<dyn PaymentGateway>, config: PollerConfig) -> Self {
        Self {
            initiator: PaymentInitiator::new(Arc::clone(&gateway)),
            poller: PaymentStatusPoller::new(gateway, config),
            cancel: CancellationToken::new(),
        }
    }

    /// Abort initiation or polling when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.poller = self.poller.with_cancellation(token.clone());
        self.cancel = token;
        self
    }

    pub fn initiator(&self) -> &PaymentInitiator {
        &self.initiator
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.poller.subscribe()
    }

    /// Initiate the payment and poll it to a terminal outcome
    ///
    /// Polling only starts once the gateway has accepted the request, so an
    /// initiation error never produces a status query. Poller settings are
    /// checked before anything is sent, and a cancelled flow never sends the
    /// push request. Cancelling while initiation is outstanding drops the
    /// request.
    pub async fn run(&self, order: &PaymentOrder) -> Result<PaymentReport, PaymentError> {
        self.poller.config().validate()?;
        if self.cancel.is_cancelled() {
            return Err(PaymentError::Cancelled);
        }

        let mut attempt = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                info!(sender_id = %order.sender_id, "payment cancelled during initiation");
                return Err(PaymentError::Cancelled);
            }
            attempt = self.initiator.initiate(order) => attempt?,
        };
        debug!(correlation_id = %attempt.correlation_id, "starting status polling");
        self.poller.poll(&mut attempt).await
    }
}
