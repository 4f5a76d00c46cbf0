//! Poll session ownership
//!
//! A [`PollSession`] is the owned value standing in for "the timer": the
//! launcher slot holds it while the run is watched, and cancelling is
//! consuming it. There is no shared handle to null out from multiple call
//! sites; releasing the session is the only way to stop the loop early.

use std::sync::Arc;

use lumen_core::domain::job::{JobHandle, StatusSnapshot};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::backend::JobBackend;
use crate::config::TrackerConfig;
use crate::error::JobOutcome;
use crate::poller::{PollLoop, snapshot_channel};

/// Owned handle to a spawned poll loop
///
/// The loop runs only as long as this value lives: dropping it releases
/// the cancel signal and stops the loop at its next await point, while
/// [`PollSession::cancel`] does the same cooperatively and also waits for
/// the task to release its timer and exit.
pub struct PollSession {
    handle: JobHandle,
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollSession {
    /// Spawns the poll loop for a freshly triggered run
    ///
    /// The returned [`JobWatch`] is the read-only side handed to the
    /// display layer; the session itself stays with the launcher slot.
    pub(crate) fn spawn<B: JobBackend + 'static>(
        backend: Arc<B>,
        handle: JobHandle,
        config: &TrackerConfig,
    ) -> (PollSession, JobWatch) {
        let (snapshot_tx, snapshot_rx) = snapshot_channel();
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let poll = PollLoop::new(
            Arc::clone(&backend),
            handle.clone(),
            config,
            snapshot_tx,
            cancel_rx,
        );

        let task = tokio::spawn(async move {
            let outcome = poll.run().await;
            // The watch may be gone; the loop ending is all that matters then
            let _ = outcome_tx.send(outcome);
        });

        let session = PollSession {
            handle: handle.clone(),
            cancel: cancel_tx,
            task,
        };
        let watch = JobWatch {
            handle,
            snapshots: snapshot_rx,
            outcome: outcome_rx,
        };

        (session, watch)
    }

    /// The run this session is watching
    pub fn handle(&self) -> &JobHandle {
        &self.handle
    }

    /// Whether the loop already reached a terminal state on its own
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Cancels the session and waits for the loop to exit
    ///
    /// Cooperative: the loop stops at its next await point; an in-flight
    /// status call is discarded, never applied. No snapshot follows the
    /// terminal `Cancelled` one.
    pub async fn cancel(self) {
        debug!("Cancelling poll session for run {}", self.handle.run_id);
        let _ = self.cancel.send(true);
        let _ = self.task.await;
    }
}

/// Read-only view of a tracked run, handed to the display layer
///
/// Snapshots arrive strictly in poll-attempt order; after the stream ends
/// the final [`JobOutcome`] carries the payload on success. Nothing here
/// can drive the poll loop.
#[derive(Debug)]
pub struct JobWatch {
    /// The run being watched
    pub handle: JobHandle,
    snapshots: tokio::sync::mpsc::Receiver<StatusSnapshot>,
    outcome: oneshot::Receiver<JobOutcome>,
}

impl JobWatch {
    /// Next status snapshot; `None` once the loop reached a terminal state
    pub async fn next_snapshot(&mut self) -> Option<StatusSnapshot> {
        self.snapshots.recv().await
    }

    /// Waits for the terminal outcome, consuming the watch
    pub async fn outcome(self) -> JobOutcome {
        // The sender is dropped without a value only if the task was torn
        // down externally, which is a cancellation from this side's view
        self.outcome.await.unwrap_or(JobOutcome::Cancelled)
    }
}
