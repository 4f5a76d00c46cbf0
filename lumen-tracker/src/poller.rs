//! Poll loop
//!
//! Drives one remote run from `Starting` to a terminal state: a tick
//! fires every `poll_interval`, the status is queried, and the pure
//! transition table in `lumen-core` decides what the observation means.
//! Each tick runs only after the previous one completed, so snapshots
//! reach the display layer strictly in attempt order.

use std::sync::Arc;

use lumen_core::domain::job::{JobHandle, JobState, ResultPayload, StatusSnapshot};
use lumen_core::domain::transition::{PollEvent, next_state};
use lumen_core::dto::job::ApiStatus;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Duration};
use tracing::{debug, info, warn};

use crate::backend::JobBackend;
use crate::config::TrackerConfig;
use crate::error::{JobOutcome, TrackerError};

/// Snapshot channel depth; a slow display backpressures the loop instead
/// of reordering or dropping observations.
const SNAPSHOT_BUFFER: usize = 32;

pub(crate) fn snapshot_channel() -> (
    mpsc::Sender<StatusSnapshot>,
    mpsc::Receiver<StatusSnapshot>,
) {
    mpsc::channel(SNAPSHOT_BUFFER)
}

/// State carried by one poll session's task
pub(crate) struct PollLoop<B> {
    backend: Arc<B>,
    handle: JobHandle,
    interval: Duration,
    max_attempts: u32,
    error_budget: u32,
    snapshots: mpsc::Sender<StatusSnapshot>,
    cancel: watch::Receiver<bool>,
    state: JobState,
    attempt: u32,
    consecutive_errors: u32,
    fetched: bool,
}

impl<B: JobBackend> PollLoop<B> {
    pub(crate) fn new(
        backend: Arc<B>,
        handle: JobHandle,
        config: &TrackerConfig,
        snapshots: mpsc::Sender<StatusSnapshot>,
        cancel: watch::Receiver<bool>,
    ) -> Self {
        Self {
            backend,
            handle,
            interval: config.poll_interval,
            max_attempts: config.max_attempts,
            error_budget: config.error_budget,
            snapshots,
            cancel,
            state: JobState::Starting,
            attempt: 0,
            consecutive_errors: 0,
            fetched: false,
        }
    }

    /// Runs the loop to its terminal state
    ///
    /// Returns on the first terminal transition; the interval and the task
    /// itself are released on every exit path, including a cancel racing an
    /// in-flight status call.
    pub(crate) async fn run(mut self) -> JobOutcome {
        info!(
            "Watching {} run {} (interval: {:?}, max attempts: {})",
            self.handle.kind, self.handle.run_id, self.interval, self.max_attempts
        );

        self.emit(StatusSnapshot::starting(&self.handle)).await;

        let mut ticker = time::interval(self.interval);

        loop {
            let cancelled = tokio::select! {
                biased;
                _ = self.cancel.changed() => true,
                _ = ticker.tick() => false,
            };
            if cancelled {
                return self.cancelled().await;
            }

            let result = tokio::select! {
                biased;
                _ = self.cancel.changed() => None,
                res = self.backend.status(&self.handle.run_id) => Some(res),
            };

            // A cancel may land while the response is in flight; the
            // result must never be applied once cancellation is recorded.
            let result = match result {
                Some(res) if !*self.cancel.borrow() => res,
                _ => return self.cancelled().await,
            };

            let outcome = match result {
                Ok(status) if status.status == ApiStatus::Success => {
                    self.consecutive_errors = 0;
                    self.apply_status(
                        status.life_cycle_state,
                        status.result_state,
                        status.state_message,
                    )
                    .await
                }
                Ok(status) => {
                    let message = status
                        .message_or("status endpoint reported an error".to_string());
                    self.apply_query_failure(message).await
                }
                Err(e) => self.apply_query_failure(e.to_string()).await,
            };

            if let Some(outcome) = outcome {
                return outcome;
            }
        }
    }

    /// Applies a well-formed status response; `Some` means terminal
    async fn apply_status(
        &mut self,
        lifecycle: String,
        result: Option<String>,
        state_message: Option<String>,
    ) -> Option<JobOutcome> {
        let event = PollEvent::Status {
            lifecycle: &lifecycle,
            result: result.as_deref(),
        };
        self.state = next_state(self.state, &event);

        match self.state {
            JobState::Success => {
                let message = state_message
                    .unwrap_or_else(|| format!("{} run completed successfully", self.handle.kind));
                self.emit(self.snapshot(lifecycle, result, message)).await;

                Some(self.fetch_output().await)
            }
            JobState::Failed => {
                let message = state_message
                    .unwrap_or_else(|| format!("{} run failed remotely", self.handle.kind));
                warn!("Run {} failed: {}", self.handle.run_id, message);
                self.emit(self.snapshot(lifecycle, result, message.clone()))
                    .await;

                Some(JobOutcome::Failed(TrackerError::JobFailed(message)))
            }
            // Non-terminal: count the attempt and check the budget
            _ => {
                self.attempt += 1;
                debug!(
                    "Run {} still {} (attempt {}/{})",
                    self.handle.run_id, lifecycle, self.attempt, self.max_attempts
                );
                let message = format!("run status: {}", lifecycle);
                self.emit(self.snapshot(lifecycle, result, message)).await;

                if self.attempt >= self.max_attempts {
                    self.state = next_state(self.state, &PollEvent::AttemptsExhausted);
                    warn!(
                        "Run {} timed out after {} status checks",
                        self.handle.run_id, self.attempt
                    );
                    let message =
                        format!("gave up waiting after {} status checks", self.attempt);
                    self.emit(self.snapshot(String::new(), None, message)).await;

                    return Some(JobOutcome::TimedOut {
                        attempts: self.attempt,
                    });
                }

                None
            }
        }
    }

    /// Applies a failed status query; `Some` means the error budget ran out
    async fn apply_query_failure(&mut self, reason: String) -> Option<JobOutcome> {
        self.consecutive_errors += 1;
        let budget_exhausted = self.consecutive_errors > self.error_budget;
        self.state = next_state(self.state, &PollEvent::QueryFailed { budget_exhausted });

        if budget_exhausted {
            warn!(
                "Status check for run {} failed terminally: {}",
                self.handle.run_id, reason
            );
            let message = format!("status check failed: {}", reason);
            self.emit(self.snapshot(String::new(), None, message)).await;

            Some(JobOutcome::Failed(TrackerError::Poll(reason)))
        } else {
            warn!(
                "Status check for run {} failed ({}/{} tolerated): {}",
                self.handle.run_id, self.consecutive_errors, self.error_budget, reason
            );
            let message = format!(
                "status check failed, retrying ({}/{}): {}",
                self.consecutive_errors, self.error_budget, reason
            );
            self.emit(self.snapshot(String::new(), None, message)).await;

            None
        }
    }

    /// Fetches the run's output once, right after `Success` was observed
    ///
    /// A fetch failure downgrades the observed state to `Failed` while the
    /// error stays a distinct `Fetch` kind: the run itself succeeded.
    async fn fetch_output(&mut self) -> JobOutcome {
        if std::mem::replace(&mut self.fetched, true) {
            return JobOutcome::Failed(TrackerError::Fetch(
                "output already fetched for this run".to_string(),
            ));
        }

        debug!("Fetching output for run {}", self.handle.run_id);

        let failure = match self.backend.output(&self.handle.run_id).await {
            Ok(out) if out.status == ApiStatus::Success => match out.insights {
                Some(payload) => {
                    info!("Run {} output retrieved", self.handle.run_id);
                    return JobOutcome::Success(ResultPayload(payload));
                }
                None => "output payload missing from response".to_string(),
            },
            Ok(out) => out.message_or("output endpoint reported an error".to_string()),
            Err(e) => e.to_string(),
        };

        warn!(
            "Run {} succeeded but output retrieval failed: {}",
            self.handle.run_id, failure
        );
        self.state = JobState::Failed;
        let message = format!("job succeeded but output retrieval failed: {}", failure);
        self.emit(self.snapshot(String::new(), None, message)).await;

        JobOutcome::Failed(TrackerError::Fetch(failure))
    }

    /// Terminal cancellation path
    async fn cancelled(mut self) -> JobOutcome {
        self.state = next_state(self.state, &PollEvent::Cancelled);
        info!("Run {} cancelled", self.handle.run_id);
        self.emit(self.snapshot(String::new(), None, "cancelled by caller".to_string()))
            .await;

        JobOutcome::Cancelled
    }

    fn snapshot(
        &self,
        lifecycle_state: String,
        result_state: Option<String>,
        message: String,
    ) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state,
            lifecycle_state,
            result_state,
            message,
            attempt: self.attempt,
        }
    }

    /// Snapshot delivery; a vanished display layer is not an error
    async fn emit(&self, snapshot: StatusSnapshot) {
        let _ = self.snapshots.send(snapshot).await;
    }
}
