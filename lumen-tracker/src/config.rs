//! Tracker configuration
//!
//! Defines the tunable parameters of the poll loop: interval, attempt
//! budget and the consecutive-error budget for transient status failures.
//! Settings are supplied by the embedding binary (the CLI reads its
//! env-backed flags and builds this struct); validate before launching.

use std::time::Duration;

/// Tracker configuration
///
/// `max_attempts * poll_interval` bounds how long a run is watched before
/// it is declared timed out.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Workspace API base URL (e.g., "http://localhost:5000")
    pub workspace_url: String,

    /// How often to poll the run's status
    pub poll_interval: Duration,

    /// How many non-terminal status responses to accept before timing out
    pub max_attempts: u32,

    /// How many *consecutive* status-query errors to tolerate before
    /// declaring the run failed. 0 means any single error is terminal.
    pub error_budget: u32,
}

impl TrackerConfig {
    /// Creates a new configuration with defaults
    pub fn new(workspace_url: String) -> Self {
        Self {
            workspace_url,
            poll_interval: Duration::from_secs(5),
            max_attempts: 60,
            error_budget: 0,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workspace_url.is_empty() {
            anyhow::bail!("workspace_url cannot be empty");
        }

        if !self.workspace_url.starts_with("http://")
            && !self.workspace_url.starts_with("https://")
        {
            anyhow::bail!("workspace_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000".to_string())
    }
}
