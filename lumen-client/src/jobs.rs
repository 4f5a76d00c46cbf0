//! Job trigger and status endpoints

use lumen_core::domain::job::JobKind;
use lumen_core::dto::insights::OutputResponse;
use lumen_core::dto::job::{StatusResponse, TriggerResponse};
use tracing::debug;

use crate::WorkspaceClient;
use crate::error::Result;

impl WorkspaceClient {
    /// Trigger a new remote run
    ///
    /// The endpoint depends on the job kind; `params` is passed through as
    /// the request body and stays opaque to this crate (e.g.
    /// `{"pipeline_type": "full"}` or `{"notebook_path": "..."}`).
    ///
    /// # Arguments
    /// * `kind` - Which remote job to trigger
    /// * `params` - Trigger parameters, forwarded verbatim
    ///
    /// # Returns
    /// The trigger response, carrying the remote run id on acceptance
    pub async fn trigger_job(
        &self,
        kind: JobKind,
        params: &serde_json::Value,
    ) -> Result<TriggerResponse> {
        let url = match kind {
            JobKind::Pipeline => format!("{}/api/pipeline/trigger", self.base_url),
            JobKind::Notebook => {
                format!("{}/api/pipeline/trigger-insights-notebook", self.base_url)
            }
        };

        debug!("Triggering {} run via {}", kind, url);
        let response = self.client.post(&url).json(params).send().await?;

        self.handle_response(response).await
    }

    /// Query the lifecycle status of a run
    ///
    /// # Arguments
    /// * `run_id` - The remote run identifier
    pub async fn run_status(&self, run_id: &str) -> Result<StatusResponse> {
        let url = format!("{}/api/pipeline/status/{}", self.base_url, run_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Fetch the output of a finished run
    ///
    /// Only meaningful once the run's lifecycle is terminal with a success
    /// result; the tracker enforces the at-most-once discipline.
    ///
    /// # Arguments
    /// * `run_id` - The remote run identifier
    pub async fn run_output(&self, run_id: &str) -> Result<OutputResponse> {
        let url = format!("{}/api/pipeline/output/{}", self.base_url, run_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
