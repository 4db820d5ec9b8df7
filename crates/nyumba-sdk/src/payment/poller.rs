use super::{PaymentAttempt, PaymentError, PaymentGateway, PaymentOutcome, PaymentReport};
use crate::error::Result as ApiResult;
use crate::types::{PaymentStatusResponse, RemotePaymentStatus};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polling schedule and limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Fixed spacing between status queries
    pub interval: Duration,
    /// Status queries issued before giving up as timed out
    pub max_attempts: u32,
    /// Consecutive failed queries that end polling as unreachable;
    /// `None` tolerates failures until the attempt ceiling
    pub max_consecutive_errors: Option<u32>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 12,
            max_consecutive_errors: Some(3),
        }
    }
}

impl PollerConfig {
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn max_consecutive_errors(mut self, limit: Option<u32>) -> Self {
        self.max_consecutive_errors = limit;
        self
    }

    /// Reject settings that would never issue a query or never wait between them
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.interval.is_zero() {
            return Err(PaymentError::invalid_config(
                "interval",
                "must be greater than zero",
            ));
        }
        if self.max_attempts == 0 {
            return Err(PaymentError::invalid_config(
                "max_attempts",
                "must be at least 1",
            ));
        }
        if self.max_consecutive_errors == Some(0) {
            return Err(PaymentError::invalid_config(
                "max_consecutive_errors",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }
}

/// What a single status query told us
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    Success,
    Failed,
    Pending,
    /// The query itself failed (network, timeout, 5xx)
    TransportError,
}

impl From<RemotePaymentStatus> for Observation {
    fn from(status: RemotePaymentStatus) -> Self {
        match status {
            RemotePaymentStatus::Success => Observation::Success,
            RemotePaymentStatus::Failed | RemotePaymentStatus::Cancelled => Observation::Failed,
            RemotePaymentStatus::Pending | RemotePaymentStatus::Unknown => Observation::Pending,
        }
    }
}

/// Poller state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Polling {
        attempts: u32,
        consecutive_errors: u32,
    },
    Succeeded,
    Failed,
    TimedOut,
    Unreachable,
}

impl PollState {
    pub const INITIAL: PollState = PollState::Polling {
        attempts: 0,
        consecutive_errors: 0,
    };

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollState::Polling { .. })
    }

    /// Number of queries issued so far, if still polling
    pub fn attempts(&self) -> Option<u32> {
        match self {
            PollState::Polling { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<PaymentOutcome> {
        match self {
            PollState::Polling { .. } => None,
            PollState::Succeeded => Some(PaymentOutcome::Succeeded),
            PollState::Failed => Some(PaymentOutcome::Failed),
            PollState::TimedOut => Some(PaymentOutcome::TimedOut),
            PollState::Unreachable => Some(PaymentOutcome::Unreachable),
        }
    }

    /// Apply the result of one status query; terminal states absorb everything
    pub fn advance(self, observation: Observation, config: &PollerConfig) -> PollState {
        let PollState::Polling {
            attempts,
            consecutive_errors,
        } = self
        else {
            return self;
        };
        let attempts = attempts + 1;

        match observation {
            Observation::Success => PollState::Succeeded,
            Observation::Failed => PollState::Failed,
            Observation::Pending if attempts >= config.max_attempts => PollState::TimedOut,
            Observation::Pending => PollState::Polling {
                attempts,
                consecutive_errors: 0,
            },
            Observation::TransportError => {
                let consecutive_errors = consecutive_errors + 1;
                if config
                    .max_consecutive_errors
                    .is_some_and(|limit| consecutive_errors >= limit)
                {
                    PollState::Unreachable
                } else if attempts >= config.max_attempts {
                    PollState::TimedOut
                } else {
                    PollState::Polling {
                        attempts,
                        consecutive_errors,
                    }
                }
            }
        }
    }
}

/// Polls a payment's status until it settles or the poller gives up
pub struct PaymentStatusPoller {
    gateway: Arc<dyn PaymentGateway>,
    config: PollerConfig,
    cancel: CancellationToken,
    state_tx: watch::Sender<PollState>,
}

impl PaymentStatusPoller {
    pub fn new(gateway: Arc<dyn PaymentGateway>, config: PollerConfig) -> Self {
        let (state_tx, _) = watch::channel(PollState::INITIAL);
        Self {
            gateway,
            config,
            cancel: CancellationToken::new(),
            state_tx,
        }
    }

    /// Stop polling when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Watch state changes, one per status query
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state_tx.subscribe()
    }

    /// Poll until the attempt reaches a terminal state
    ///
    /// The first query goes out one interval after the call; later queries
    /// follow on the same fixed schedule, one at a time. A reply slower than
    /// the interval is followed by the next query as soon as it returns, and
    /// the schedule then realigns to the interval without replaying the
    /// ticks it missed. A blank correlation id or an invalid config fails
    /// immediately without touching the network.
    pub async fn poll(&self, attempt: &mut PaymentAttempt) -> Result<PaymentReport, PaymentError> {
        self.config.validate()?;
        let correlation_id = attempt.correlation_id.trim().to_string();
        if correlation_id.is_empty() {
            return Err(PaymentError::MissingCorrelationId);
        }

        let period = self.config.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut state = PollState::INITIAL;
        let mut queries = 0u32;
        let mut receipt = None;
        self.state_tx.send_replace(state);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(self.cancelled(&correlation_id, state)),
                _ = ticker.tick() => {}
            }

            let reply = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(self.cancelled(&correlation_id, state)),
                reply = self.gateway.payment_status(&correlation_id) => reply,
            };
            queries += 1;

            let observation = self.observe(&correlation_id, reply, attempt, &mut receipt);
            state = state.advance(observation, &self.config);
            self.state_tx.send_replace(state);

            if let Some(outcome) = state.outcome() {
                info!(%correlation_id, %outcome, queries, "payment polling finished");
                return Ok(PaymentReport {
                    outcome,
                    attempt: attempt.clone(),
                    queries,
                    receipt,
                });
            }
        }
    }

    fn observe(
        &self,
        correlation_id: &str,
        reply: ApiResult<PaymentStatusResponse>,
        attempt: &mut PaymentAttempt,
        receipt: &mut Option<String>,
    ) -> Observation {
        match reply {
            Ok(response) => {
                debug!(%correlation_id, status = ?response.status, "payment status");
                if response.status == RemotePaymentStatus::Unknown {
                    warn!(%correlation_id, "unrecognised payment status, treating as pending");
                }
                attempt.observe(response.status);
                if response.receipt.is_some() {
                    *receipt = response.receipt;
                }
                response.status.into()
            }
            Err(e) => {
                warn!(%correlation_id, error = %e, retryable = e.is_retryable(), "payment status query failed");
                Observation::TransportError
            }
        }
    }

    fn cancelled(&self, correlation_id: &str, state: PollState) -> PaymentError {
        info!(%correlation_id, ?state, "payment polling cancelled");
        PaymentError::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::testing::{pending, ScriptedGateway, StatusReply};
    use crate::payment::AttemptStatus;
    use rust_decimal_macros::dec;

    fn attempt(id: &str) -> PaymentAttempt {
        PaymentAttempt::new("254712345678", dec!(25000), id)
    }

    fn status(s: RemotePaymentStatus) -> StatusReply {
        StatusReply::Status(s)
    }

    // ===== State machine =====

    #[test]
    fn test_pending_until_ceiling_times_out() {
        let config = PollerConfig::default();
        let mut state = PollState::INITIAL;
        for n in 1..12 {
            state = state.advance(Observation::Pending, &config);
            assert_eq!(state.attempts(), Some(n));
        }
        state = state.advance(Observation::Pending, &config);
        assert_eq!(state, PollState::TimedOut);
    }

    #[test]
    fn test_terminal_states_absorb() {
        let config = PollerConfig::default();
        for terminal in [
            PollState::Succeeded,
            PollState::Failed,
            PollState::TimedOut,
            PollState::Unreachable,
        ] {
            assert!(terminal.is_terminal());
            assert_eq!(terminal.advance(Observation::Success, &config), terminal);
            assert_eq!(terminal.advance(Observation::TransportError, &config), terminal);
        }
    }

    #[test]
    fn test_error_streak_resets_on_response() {
        let config = PollerConfig::default().max_consecutive_errors(Some(2));
        let state = PollState::INITIAL
            .advance(Observation::TransportError, &config)
            .advance(Observation::Pending, &config)
            .advance(Observation::TransportError, &config);
        assert_eq!(
            state,
            PollState::Polling {
                attempts: 3,
                consecutive_errors: 1
            }
        );
        assert_eq!(
            state.advance(Observation::TransportError, &config),
            PollState::Unreachable
        );
    }

    #[test]
    fn test_errors_tolerated_without_limit() {
        let config = PollerConfig::default()
            .max_attempts(3)
            .max_consecutive_errors(None);
        let state = PollState::INITIAL
            .advance(Observation::TransportError, &config)
            .advance(Observation::TransportError, &config);
        assert!(!state.is_terminal());
        assert_eq!(
            state.advance(Observation::TransportError, &config),
            PollState::TimedOut
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(PollerConfig::default().validate().is_ok());
        assert!(PollerConfig::default()
            .max_consecutive_errors(None)
            .validate()
            .is_ok());

        let invalid = [
            (PollerConfig::default().interval(Duration::ZERO), "interval"),
            (PollerConfig::default().max_attempts(0), "max_attempts"),
            (
                PollerConfig::default().max_consecutive_errors(Some(0)),
                "max_consecutive_errors",
            ),
        ];
        for (config, expected) in invalid {
            match config.validate() {
                Err(PaymentError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected invalid {expected}, got {other:?}"),
            }
        }
    }

    // ===== Poller =====

    #[tokio::test(start_paused = true)]
    async fn test_success_after_three_pending() {
        let gateway = Arc::new(
            ScriptedGateway::accepting("ABC123")
                .with_statuses(pending(3))
                .with_statuses([status(RemotePaymentStatus::Success)]),
        );
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default());
        let start = Instant::now();

        let mut attempt = attempt("ABC123");
        let report = poller.poll(&mut attempt).await.unwrap();

        assert_eq!(report.outcome, PaymentOutcome::Succeeded);
        assert_eq!(report.queries, 4);
        assert!(report.message().contains("successfully"));
        assert_eq!(attempt.status, AttemptStatus::Success);
        assert_eq!(gateway.status_count(), 4);

        let offsets: Vec<Duration> = gateway
            .status_times()
            .into_iter()
            .map(|at| at - start)
            .collect();
        assert_eq!(
            offsets,
            vec![
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(15),
                Duration::from_secs(20)
            ]
        );
        assert!(gateway
            .status_calls
            .lock()
            .unwrap()
            .iter()
            .all(|(id, _)| id == "ABC123"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_twelve_pending_times_out() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123").with_statuses(pending(20)));
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default());

        let report = poller.poll(&mut attempt("ABC123")).await.unwrap();

        assert_eq!(report.outcome, PaymentOutcome::TimedOut);
        assert_eq!(report.queries, 12);
        assert_ne!(report.message(), PaymentOutcome::Failed.message());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.status_count(), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_on_second_check_stops() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123").with_statuses([
            status(RemotePaymentStatus::Pending),
            status(RemotePaymentStatus::Failed),
            status(RemotePaymentStatus::Success),
        ]));
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default());

        let mut attempt = attempt("ABC123");
        let report = poller.poll(&mut attempt).await.unwrap();

        assert_eq!(report.outcome, PaymentOutcome::Failed);
        assert_eq!(attempt.status, AttemptStatus::Failed);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(gateway.status_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_by_payer_is_failure() {
        let gateway = Arc::new(
            ScriptedGateway::accepting("ABC123")
                .with_statuses([status(RemotePaymentStatus::Cancelled)]),
        );
        let poller = PaymentStatusPoller::new(gateway, PollerConfig::default());

        let report = poller.poll(&mut attempt("ABC123")).await.unwrap();
        assert_eq!(report.outcome, PaymentOutcome::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_correlation_id_makes_no_request() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123"));
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default());
        let start = Instant::now();

        let result = poller.poll(&mut attempt("  ")).await;

        assert!(matches!(result, Err(PaymentError::MissingCorrelationId)));
        assert_eq!(Instant::now(), start);
        assert_eq!(gateway.status_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spacing_independent_of_latency() {
        let gateway = Arc::new(
            ScriptedGateway::accepting("ABC123")
                .with_latency(Duration::from_secs(2))
                .with_statuses(pending(2))
                .with_statuses([status(RemotePaymentStatus::Success)]),
        );
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default());

        poller.poll(&mut attempt("ABC123")).await.unwrap();

        let times = gateway.status_times();
        assert_eq!(times.len(), 3);
        for pair in times.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::from_secs(5));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_reply_is_followed_without_overlap() {
        let gateway = Arc::new(
            ScriptedGateway::accepting("ABC123")
                .with_latency(Duration::from_secs(7))
                .with_statuses(pending(2))
                .with_statuses([status(RemotePaymentStatus::Success)]),
        );
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default());
        let start = Instant::now();

        let report = poller.poll(&mut attempt("ABC123")).await.unwrap();
        assert_eq!(report.queries, 3);

        // One missed tick fires on return, never a burst of catch-up queries
        let offsets: Vec<Duration> = gateway
            .status_times()
            .into_iter()
            .map(|at| at - start)
            .collect();
        assert_eq!(
            offsets,
            vec![
                Duration::from_secs(5),
                Duration::from_secs(12),
                Duration::from_secs(19)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_rejected_without_request() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123").with_statuses(pending(3)));
        let config = PollerConfig::default().interval(Duration::ZERO);
        let poller = PaymentStatusPoller::new(gateway.clone(), config);

        let result = poller.poll(&mut attempt("ABC123")).await;

        assert!(matches!(
            result,
            Err(PaymentError::InvalidConfig { ref field, .. }) if field == "interval"
        ));
        assert_eq!(gateway.status_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempt_ceiling_makes_no_request() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123").with_statuses(pending(3)));
        let poller =
            PaymentStatusPoller::new(gateway.clone(), PollerConfig::default().max_attempts(0));

        let result = poller.poll(&mut attempt("ABC123")).await;

        assert!(matches!(result, Err(PaymentError::InvalidConfig { .. })));
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(gateway.status_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_errors_become_unreachable() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123").with_statuses([
            StatusReply::TransportError,
            StatusReply::TransportError,
            StatusReply::TransportError,
            status(RemotePaymentStatus::Success),
        ]));
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default());

        let report = poller.poll(&mut attempt("ABC123")).await.unwrap();

        assert_eq!(report.outcome, PaymentOutcome::Unreachable);
        assert_eq!(report.queries, 3);
        assert_eq!(report.attempt.status, AttemptStatus::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_tolerated_when_policy_disabled() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123").with_statuses([
            StatusReply::TransportError,
            StatusReply::TransportError,
            StatusReply::TransportError,
            StatusReply::TransportError,
            status(RemotePaymentStatus::Success),
        ]));
        let config = PollerConfig::default().max_consecutive_errors(None);
        let poller = PaymentStatusPoller::new(gateway.clone(), config);

        let report = poller.poll(&mut attempt("ABC123")).await.unwrap();

        assert_eq!(report.outcome, PaymentOutcome::Succeeded);
        assert_eq!(report.queries, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_polling() {
        let gateway = Arc::new(ScriptedGateway::accepting("ABC123").with_statuses(pending(20)));
        let token = CancellationToken::new();
        let poller = PaymentStatusPoller::new(gateway.clone(), PollerConfig::default())
            .with_cancellation(token.clone());

        let mut attempt = attempt("ABC123");
        let (result, _) = tokio::join!(poller.poll(&mut attempt), async {
            tokio::time::sleep(Duration::from_secs(12)).await;
            token.cancel();
        });

        assert!(matches!(result, Err(PaymentError::Cancelled)));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(gateway.status_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_published_to_subscribers() {
        let gateway = Arc::new(
            ScriptedGateway::accepting("ABC123")
                .with_statuses(pending(1))
                .with_statuses([status(RemotePaymentStatus::Success)]),
        );
        let poller = PaymentStatusPoller::new(gateway, PollerConfig::default());
        let rx = poller.subscribe();

        poller.poll(&mut attempt("ABC123")).await.unwrap();

        assert_eq!(*rx.borrow(), PollState::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_carried_into_report() {
        struct ReceiptGateway;

        #[async_trait::async_trait]
        impl PaymentGateway for ReceiptGateway {
            async fn initiate_payment(
                &self,
                _request: &crate::types::PayRequest,
                _key: &str,
            ) -> ApiResult<crate::types::PayResponse> {
                unreachable!()
            }

            async fn payment_status(&self, _id: &str) -> ApiResult<PaymentStatusResponse> {
                Ok(PaymentStatusResponse {
                    status: RemotePaymentStatus::Success,
                    message: None,
                    receipt: Some("QKX12ABC".to_string()),
                })
            }

            async fn due_balance(&self, _id: &str) -> ApiResult<rust_decimal::Decimal> {
                unreachable!()
            }
        }

        let poller = PaymentStatusPoller::new(Arc::new(ReceiptGateway), PollerConfig::default());
        let report = poller.poll(&mut attempt("ABC123")).await.unwrap();
        assert_eq!(report.receipt.as_deref(), Some("QKX12ABC"));
    }
}
