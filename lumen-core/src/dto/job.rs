//! Job trigger and status DTOs

use serde::{Deserialize, Serialize};

/// String discriminator carried by every workspace API response
///
/// Deserialization rejects anything outside these three values, so an
/// unknown discriminator surfaces as a parse error at the client boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Running,
    Error,
}

/// Response to a job trigger request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a run status query
///
/// `life_cycle_state` is the remote system's raw status string (e.g.
/// RUNNING, TERMINATED); `result_state` is the raw outcome marker present
/// only once the run has stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub run_id: Option<String>,
    pub life_cycle_state: String,
    #[serde(default)]
    pub result_state: Option<String>,
    #[serde(default)]
    pub state_message: Option<String>,
    /// Epoch milliseconds on the wire, as the remote jobs API sends them
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl StatusResponse {
    /// The remote state message, or a fallback when none was sent
    pub fn message_or(self, fallback: String) -> String {
        self.state_message.unwrap_or(fallback)
    }
}
