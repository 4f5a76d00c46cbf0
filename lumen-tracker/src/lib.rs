//! Lumen Tracker
//!
//! The asynchronous job-tracking core. A [`JobLauncher`] owns one slot for
//! a remote run: launching triggers the run, spawns an owned poll session,
//! and hands the caller a [`JobWatch`] with a read-only snapshot stream and
//! the final outcome. Launching again (or cancelling) tears the previous
//! session down before anything new starts.
//!
//! Architecture:
//! - Backend: trait over the workspace API so the loop is testable
//! - Poller: tick loop driving the pure transition table in `lumen-core`
//! - Session: ownership of the spawned task and its cancel signal
//! - Launcher: the slot; trigger, relaunch and the synchronous refresh path

pub mod backend;
pub mod config;
pub mod error;
pub mod launcher;
pub mod poller;
pub mod session;

pub use backend::JobBackend;
pub use config::TrackerConfig;
pub use error::{JobOutcome, TrackerError};
pub use launcher::JobLauncher;
pub use session::{JobWatch, PollSession};

#[cfg(test)]
pub(crate) mod testing;
