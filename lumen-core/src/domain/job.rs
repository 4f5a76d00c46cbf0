//! Job domain types

use serde::{Deserialize, Serialize};

/// Kind of remote batch job the dashboard can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    Pipeline,
    Notebook,
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobKind::Pipeline => write!(f, "pipeline"),
            JobKind::Notebook => write!(f, "notebook"),
        }
    }
}

/// Identifier for a triggered job run
///
/// Created by the launcher once the remote accepts a trigger. Immutable;
/// owned by the poll session for its lifetime. The run id is an opaque
/// string minted by the remote workspace, never locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub run_id: String,
    pub kind: JobKind,
}

/// Client-side job state
///
/// Exactly one state is active per handle at any time. Transitions are
/// monotonic: once a terminal state is reached nothing moves again, and
/// only a fresh launch re-enters via `Starting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Idle,
    Starting,
    Running,
    Success,
    Failed,
    Timeout,
    Cancelled,
}

impl JobState {
    /// Whether no further transition can occur without a new launch
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Success | JobState::Failed | JobState::Timeout | JobState::Cancelled
        )
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobState::Idle => "idle",
            JobState::Starting => "starting",
            JobState::Running => "running",
            JobState::Success => "success",
            JobState::Failed => "failed",
            JobState::Timeout => "timeout",
            JobState::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Remote lifecycle strings that mean the run has stopped
pub const TERMINAL_LIFECYCLE_STATES: [&str; 3] = ["TERMINATED", "SKIPPED", "INTERNAL_ERROR"];

/// Remote result marker for a successful run
pub const RESULT_STATE_SUCCESS: &str = "SUCCESS";

/// Whether a raw remote lifecycle string is terminal
pub fn is_terminal_lifecycle(lifecycle: &str) -> bool {
    TERMINAL_LIFECYCLE_STATES.contains(&lifecycle)
}

/// One observation of job status at a poll tick
///
/// Transient; the display layer keeps only the latest one. `attempt` is
/// the number of non-terminal status responses seen so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub state: JobState,
    pub lifecycle_state: String,
    pub result_state: Option<String>,
    pub message: String,
    pub attempt: u32,
}

impl StatusSnapshot {
    /// Snapshot for a job that was triggered but not yet polled
    pub fn starting(handle: &JobHandle) -> Self {
        Self {
            state: JobState::Starting,
            lifecycle_state: String::new(),
            result_state: None,
            message: format!("{} run {} started", handle.kind, handle.run_id),
            attempt: 0,
        }
    }
}

/// Opaque output of a successful job run
///
/// Returned once, only on `Success`; ownership moves to the consumer and
/// the payload is never refetched automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload(pub serde_json::Value);

impl ResultPayload {
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!JobState::Idle.is_terminal());
        assert!(!JobState::Starting.is_terminal());
        assert!(!JobState::Running.is_terminal());
        assert!(JobState::Success.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(JobState::Timeout.is_terminal());
        assert!(JobState::Cancelled.is_terminal());
    }

    #[test]
    fn terminal_lifecycle_strings() {
        assert!(is_terminal_lifecycle("TERMINATED"));
        assert!(is_terminal_lifecycle("SKIPPED"));
        assert!(is_terminal_lifecycle("INTERNAL_ERROR"));
        assert!(!is_terminal_lifecycle("RUNNING"));
        assert!(!is_terminal_lifecycle("PENDING"));
    }

    #[test]
    fn starting_snapshot_carries_run_id() {
        let handle = JobHandle {
            run_id: "run-42".to_string(),
            kind: JobKind::Notebook,
        };
        let snap = StatusSnapshot::starting(&handle);
        assert_eq!(snap.state, JobState::Starting);
        assert_eq!(snap.attempt, 0);
        assert!(snap.message.contains("run-42"));
        assert!(snap.message.contains("notebook"));
    }
}
