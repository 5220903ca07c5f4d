use super::scheduler::{Tick, schedule_repeating};
use crate::config::PollSettings;
use crate::domain::payment::PaymentStatus;
use crate::domain::ports::PaymentGatewayRef;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::fmt;
use std::ops::ControlFlow;
use tracing::{debug, warn};

/// Why the polling loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The payment reached one of the terminal statuses.
    Terminal,
    /// The attempt budget ran out first.
    TimedOut,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Terminal => f.write_str("terminal"),
            StopReason::TimedOut => f.write_str("timed-out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub reason: StopReason,
    /// Number of status checks performed, failed ones included.
    pub attempts: u32,
    /// Status from the most recent successful check.
    pub last_status: Option<PaymentStatus>,
}

#[derive(Debug, Clone, PartialEq)]
enum LoopState {
    Running(u32),
    Done(PollOutcome),
}

/// Checks a payment's status once per tick until a stop condition holds.
pub struct PollJob {
    gateway: PaymentGatewayRef,
    payment_id: String,
    settings: PollSettings,
    state: LoopState,
    last_status: Option<PaymentStatus>,
}

impl PollJob {
    pub fn new(gateway: PaymentGatewayRef, payment_id: String, settings: PollSettings) -> Self {
        Self {
            gateway,
            payment_id,
            settings,
            state: LoopState::Running(0),
            last_status: None,
        }
    }

    fn finish(&mut self, reason: StopReason, attempts: u32) -> ControlFlow<PollOutcome> {
        let outcome = PollOutcome {
            reason,
            attempts,
            last_status: self.last_status.clone(),
        };
        self.state = LoopState::Done(outcome.clone());
        ControlFlow::Break(outcome)
    }
}

#[async_trait]
impl Tick for PollJob {
    type Output = PollOutcome;

    async fn tick(&mut self) -> ControlFlow<PollOutcome> {
        let attempt = match &self.state {
            LoopState::Running(count) => count + 1,
            LoopState::Done(outcome) => return ControlFlow::Break(outcome.clone()),
        };
        self.state = LoopState::Running(attempt);

        match self.gateway.fetch_status(&self.payment_id).await {
            Ok(status) => {
                println!("Payment ID: {}, Status: {}", self.payment_id, status);
                let terminal = self.settings.is_terminal(&status);
                self.last_status = Some(status);
                if terminal {
                    return self.finish(StopReason::Terminal, attempt);
                }
            }
            Err(e) => {
                warn!(
                    payment_id = %self.payment_id,
                    attempt,
                    error = %e,
                    "Error checking payment status"
                );
            }
        }

        if attempt >= self.settings.max_attempts {
            return self.finish(StopReason::TimedOut, attempt);
        }
        debug!(attempt, max_attempts = self.settings.max_attempts, "Payment not settled yet");
        ControlFlow::Continue(())
    }
}

/// Polls `payment_id` on the configured interval and waits for the loop to
/// stop, either on a terminal status or when the attempt budget is spent.
pub async fn poll_until_settled(
    gateway: PaymentGatewayRef,
    payment_id: &str,
    settings: PollSettings,
) -> Result<PollOutcome> {
    let interval = settings.interval;
    let job = PollJob::new(gateway, payment_id.to_string(), settings);
    schedule_repeating(interval, job)
        .join()
        .await
        .ok_or(PaymentError::PollingCancelled)
}
