//! Scripted in-memory backend for tracker tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use lumen_client::ClientError;
use lumen_core::domain::job::JobKind;
use lumen_core::dto::insights::OutputResponse;
use lumen_core::dto::job::{ApiStatus, StatusResponse, TriggerResponse};
use serde_json::json;

use crate::backend::JobBackend;

/// Backend that replays a scripted sequence of status responses
///
/// Triggers are accepted with generated run ids (`run-1`, `run-2`, ...)
/// unless an explicit trigger response is queued. Once the status script
/// is exhausted the run reports RUNNING forever, which lets timeout and
/// cancellation tests run without counting ticks up front.
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    trigger_override: Mutex<Option<Result<TriggerResponse, ClientError>>>,
    statuses: Mutex<VecDeque<Result<StatusResponse, ClientError>>>,
    output_override: Mutex<Option<Result<OutputResponse, ClientError>>>,
    refresh_override: Mutex<Option<Result<OutputResponse, ClientError>>>,
    pub trigger_calls: AtomicU32,
    pub status_calls: AtomicU32,
    pub output_calls: AtomicU32,
    pub refresh_calls: AtomicU32,
    /// run_id of every status query, in order
    pub status_log: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statuses(
        self,
        statuses: impl IntoIterator<Item = Result<StatusResponse, ClientError>>,
    ) -> Self {
        self.statuses.lock().unwrap().extend(statuses);
        self
    }

    pub fn with_trigger(self, response: Result<TriggerResponse, ClientError>) -> Self {
        *self.trigger_override.lock().unwrap() = Some(response);
        self
    }

    pub fn with_output(self, response: Result<OutputResponse, ClientError>) -> Self {
        *self.output_override.lock().unwrap() = Some(response);
        self
    }

    pub fn with_refresh(self, response: Result<OutputResponse, ClientError>) -> Self {
        *self.refresh_override.lock().unwrap() = Some(response);
        self
    }
}

#[async_trait]
impl JobBackend for ScriptedBackend {
    async fn trigger(
        &self,
        _kind: JobKind,
        _params: &serde_json::Value,
    ) -> Result<TriggerResponse, ClientError> {
        let n = self.trigger_calls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(response) = self.trigger_override.lock().unwrap().take() {
            return response;
        }

        Ok(TriggerResponse {
            status: ApiStatus::Success,
            run_id: Some(format!("run-{n}")),
            message: None,
        })
    }

    async fn status(&self, run_id: &str) -> Result<StatusResponse, ClientError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.status_log.lock().unwrap().push(run_id.to_string());

        match self.statuses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(running()),
        }
    }

    async fn output(&self, _run_id: &str) -> Result<OutputResponse, ClientError> {
        self.output_calls.fetch_add(1, Ordering::SeqCst);

        match self.output_override.lock().unwrap().take() {
            Some(response) => response,
            None => Ok(success_output()),
        }
    }

    async fn refresh(&self) -> Result<OutputResponse, ClientError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);

        match self.refresh_override.lock().unwrap().take() {
            Some(response) => response,
            None => Ok(success_output()),
        }
    }
}

/// A non-terminal RUNNING status response
pub(crate) fn running() -> StatusResponse {
    StatusResponse {
        status: ApiStatus::Success,
        run_id: None,
        life_cycle_state: "RUNNING".to_string(),
        result_state: None,
        state_message: None,
        start_time: None,
        end_time: None,
    }
}

/// A terminal status response with the given result marker
pub(crate) fn terminated(result_state: &str) -> StatusResponse {
    StatusResponse {
        status: ApiStatus::Success,
        run_id: None,
        life_cycle_state: "TERMINATED".to_string(),
        result_state: Some(result_state.to_string()),
        state_message: None,
        start_time: None,
        end_time: None,
    }
}

/// A transport-level query failure
pub(crate) fn query_error() -> ClientError {
    ClientError::api_error(500, "connection reset by peer")
}

/// The payload served by default for output and refresh
pub(crate) fn success_output() -> OutputResponse {
    OutputResponse {
        status: ApiStatus::Success,
        insights: Some(json!({
            "top_products": [
                {"Description": "Ceramic Mug", "total_quantity_sold": 94}
            ]
        })),
        message: None,
    }
}
