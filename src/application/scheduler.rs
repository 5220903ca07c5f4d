use async_trait::async_trait;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// A unit of work driven by [`schedule_repeating`].
///
/// The job owns whatever state it needs between ticks. Returning
/// `ControlFlow::Break` ends the schedule and hands the value to the caller.
#[async_trait]
pub trait Tick: Send + 'static {
    type Output: Send + 'static;

    async fn tick(&mut self) -> ControlFlow<Self::Output>;
}

/// Handle to a running repeating job.
pub struct RepeatingHandle<R> {
    task: JoinHandle<R>,
}

impl<R> RepeatingHandle<R> {
    /// Stops future ticks. A tick already in progress is dropped at its next
    /// await point.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the job to break out. Returns `None` if it was cancelled.
    pub async fn join(self) -> Option<R> {
        match self.task.await {
            Ok(output) => Some(output),
            Err(e) if e.is_cancelled() => None,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

/// Runs `job` every `period` on a background task, starting immediately.
///
/// Ticks are serialized: the next one never starts before the previous one
/// returned. A tick that overruns the period delays the schedule instead of
/// causing a burst of catch-up ticks.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn schedule_repeating<J: Tick>(period: Duration, mut job: J) -> RepeatingHandle<J::Output> {
    let task = tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if let ControlFlow::Break(output) = job.tick().await {
                break output;
            }
        }
    });
    RepeatingHandle { task }
}
