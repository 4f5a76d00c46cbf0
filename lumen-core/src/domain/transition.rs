//! Pure poll state machine
//!
//! The transition table is kept free of timers and HTTP so it can be
//! tested as a plain function. The poll loop in `lumen-tracker` feeds it
//! one event per tick and acts on the returned state.

use crate::domain::job::{JobState, RESULT_STATE_SUCCESS, is_terminal_lifecycle};

/// One observation fed to the state machine per poll tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent<'a> {
    /// Status query succeeded and reported the remote lifecycle
    Status {
        lifecycle: &'a str,
        result: Option<&'a str>,
    },
    /// Status query itself failed (network or protocol error)
    QueryFailed { budget_exhausted: bool },
    /// Non-terminal response count reached the attempt budget
    AttemptsExhausted,
    /// Caller requested cancellation
    Cancelled,
}

/// Computes the next job state for an event
///
/// Terminal states absorb every event; only a new launch leaves them.
pub fn next_state(current: JobState, event: &PollEvent<'_>) -> JobState {
    if current.is_terminal() {
        return current;
    }

    match event {
        PollEvent::Cancelled => JobState::Cancelled,
        PollEvent::AttemptsExhausted => JobState::Timeout,
        PollEvent::QueryFailed { budget_exhausted } => {
            if *budget_exhausted {
                JobState::Failed
            } else {
                current
            }
        }
        PollEvent::Status { lifecycle, result } => {
            if is_terminal_lifecycle(lifecycle) {
                if *result == Some(RESULT_STATE_SUCCESS) {
                    JobState::Success
                } else {
                    JobState::Failed
                }
            } else {
                JobState::Running
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_status() -> PollEvent<'static> {
        PollEvent::Status {
            lifecycle: "RUNNING",
            result: None,
        }
    }

    #[test]
    fn starting_advances_to_running_on_first_status() {
        assert_eq!(
            next_state(JobState::Starting, &running_status()),
            JobState::Running
        );
    }

    #[test]
    fn running_stays_running_while_non_terminal() {
        assert_eq!(
            next_state(JobState::Running, &running_status()),
            JobState::Running
        );
        assert_eq!(
            next_state(
                JobState::Running,
                &PollEvent::Status {
                    lifecycle: "PENDING",
                    result: None
                }
            ),
            JobState::Running
        );
    }

    #[test]
    fn terminal_lifecycle_with_success_marker_succeeds() {
        assert_eq!(
            next_state(
                JobState::Running,
                &PollEvent::Status {
                    lifecycle: "TERMINATED",
                    result: Some("SUCCESS")
                }
            ),
            JobState::Success
        );
    }

    #[test]
    fn terminal_lifecycle_without_success_marker_fails() {
        assert_eq!(
            next_state(
                JobState::Running,
                &PollEvent::Status {
                    lifecycle: "TERMINATED",
                    result: Some("FAILED")
                }
            ),
            JobState::Failed
        );
        assert_eq!(
            next_state(
                JobState::Running,
                &PollEvent::Status {
                    lifecycle: "INTERNAL_ERROR",
                    result: None
                }
            ),
            JobState::Failed
        );
    }

    #[test]
    fn query_failure_within_budget_keeps_state() {
        assert_eq!(
            next_state(
                JobState::Running,
                &PollEvent::QueryFailed {
                    budget_exhausted: false
                }
            ),
            JobState::Running
        );
        assert_eq!(
            next_state(
                JobState::Starting,
                &PollEvent::QueryFailed {
                    budget_exhausted: false
                }
            ),
            JobState::Starting
        );
    }

    #[test]
    fn query_failure_past_budget_fails() {
        assert_eq!(
            next_state(
                JobState::Running,
                &PollEvent::QueryFailed {
                    budget_exhausted: true
                }
            ),
            JobState::Failed
        );
    }

    #[test]
    fn attempts_exhausted_times_out() {
        assert_eq!(
            next_state(JobState::Running, &PollEvent::AttemptsExhausted),
            JobState::Timeout
        );
    }

    #[test]
    fn cancel_from_any_non_terminal_state() {
        assert_eq!(
            next_state(JobState::Starting, &PollEvent::Cancelled),
            JobState::Cancelled
        );
        assert_eq!(
            next_state(JobState::Running, &PollEvent::Cancelled),
            JobState::Cancelled
        );
    }

    #[test]
    fn terminal_states_absorb_all_events() {
        for terminal in [
            JobState::Success,
            JobState::Failed,
            JobState::Timeout,
            JobState::Cancelled,
        ] {
            assert_eq!(next_state(terminal, &running_status()), terminal);
            assert_eq!(next_state(terminal, &PollEvent::Cancelled), terminal);
            assert_eq!(next_state(terminal, &PollEvent::AttemptsExhausted), terminal);
        }
    }
}
