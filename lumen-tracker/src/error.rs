//! Tracker error and outcome types

use lumen_core::domain::job::{JobState, ResultPayload};
use thiserror::Error;

/// Errors reported by the job tracker
///
/// Each variant maps to one terminal failure mode of a tracked run. None
/// of them crash the host; they end the poll stream and are handed to the
/// display layer. `Fetch` is deliberately distinct from `Poll`: the run
/// itself succeeded but its output could not be retrieved.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Remote rejected the trigger or the trigger call itself failed
    #[error("job launch failed: {0}")]
    Launch(String),

    /// Status query failed past the consecutive-error budget
    #[error("status poll failed: {0}")]
    Poll(String),

    /// Attempt budget exhausted while the run was still non-terminal
    #[error("job still running after {attempts} status checks")]
    Timeout { attempts: u32 },

    /// Output retrieval failed after the run reported success
    #[error("output fetch failed after job success: {0}")]
    Fetch(String),

    /// Remote reported a terminal lifecycle without the success marker
    #[error("job failed remotely: {0}")]
    JobFailed(String),

    /// Caller cancelled the poll session
    #[error("job cancelled")]
    Cancelled,
}

/// Final result of one tracked run, delivered once per [`crate::JobWatch`]
#[derive(Debug)]
pub enum JobOutcome {
    /// Run succeeded and its output was fetched exactly once
    Success(ResultPayload),
    /// Run failed, a poll failed past budget, or the fetch failed
    Failed(TrackerError),
    /// Attempt budget exhausted
    TimedOut { attempts: u32 },
    /// Session cancelled by the caller
    Cancelled,
}

impl JobOutcome {
    /// The terminal job state this outcome corresponds to
    pub fn state(&self) -> JobState {
        match self {
            JobOutcome::Success(_) => JobState::Success,
            JobOutcome::Failed(_) => JobState::Failed,
            JobOutcome::TimedOut { .. } => JobState::Timeout,
            JobOutcome::Cancelled => JobState::Cancelled,
        }
    }

    /// Consume the outcome, yielding the payload on success
    pub fn into_result(self) -> Result<ResultPayload, TrackerError> {
        match self {
            JobOutcome::Success(payload) => Ok(payload),
            JobOutcome::Failed(err) => Err(err),
            JobOutcome::TimedOut { attempts } => Err(TrackerError::Timeout { attempts }),
            JobOutcome::Cancelled => Err(TrackerError::Cancelled),
        }
    }
}
