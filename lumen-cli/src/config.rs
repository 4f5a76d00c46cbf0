//! Configuration module
//!
//! CLI configuration, built from flags and environment variables in main.

use std::time::Duration;

use lumen_tracker::TrackerConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the workspace API
    pub workspace_url: String,
    /// Seconds between status checks
    pub poll_interval: Duration,
    /// Status checks before a run is declared timed out
    pub max_attempts: u32,
    /// Consecutive status-check errors tolerated before failing
    pub error_budget: u32,
}

impl Config {
    /// The tracker configuration these settings describe
    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig {
            workspace_url: self.workspace_url.clone(),
            poll_interval: self.poll_interval,
            max_attempts: self.max_attempts,
            error_budget: self.error_budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            workspace_url: "http://localhost:5000".to_string(),
            poll_interval: Duration::from_secs(5),
            max_attempts: 60,
            error_budget: 0,
        }
    }

    #[test]
    fn tracker_config_carries_all_settings() {
        let tracker = config().tracker();
        assert_eq!(tracker.workspace_url, "http://localhost:5000");
        assert_eq!(tracker.poll_interval, Duration::from_secs(5));
        assert_eq!(tracker.max_attempts, 60);
        assert!(tracker.validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected_before_launching() {
        let mut cfg = config();
        cfg.poll_interval = Duration::ZERO;
        assert!(cfg.tracker().validate().is_err());

        cfg.poll_interval = Duration::from_secs(5);
        cfg.max_attempts = 0;
        assert!(cfg.tracker().validate().is_err());
    }
}
