//! Workspace backend abstraction
//!
//! The poll loop only needs the four collaborator calls from the wire
//! protocol: trigger, status, output, refresh. Putting them behind a trait
//! keeps the tracker testable against a scripted in-memory backend.

use async_trait::async_trait;
use lumen_client::{ClientError, WorkspaceClient};
use lumen_core::domain::job::JobKind;
use lumen_core::dto::insights::OutputResponse;
use lumen_core::dto::job::{StatusResponse, TriggerResponse};

/// Remote collaborator consumed by the tracker
#[async_trait]
pub trait JobBackend: Send + Sync {
    /// Launch a remote run
    async fn trigger(
        &self,
        kind: JobKind,
        params: &serde_json::Value,
    ) -> Result<TriggerResponse, ClientError>;

    /// Query a run's lifecycle status
    async fn status(&self, run_id: &str) -> Result<StatusResponse, ClientError>;

    /// Fetch a finished run's output
    async fn output(&self, run_id: &str) -> Result<OutputResponse, ClientError>;

    /// Pull the latest materialized insights without launching anything
    async fn refresh(&self) -> Result<OutputResponse, ClientError>;
}

#[async_trait]
impl JobBackend for WorkspaceClient {
    async fn trigger(
        &self,
        kind: JobKind,
        params: &serde_json::Value,
    ) -> Result<TriggerResponse, ClientError> {
        self.trigger_job(kind, params).await
    }

    async fn status(&self, run_id: &str) -> Result<StatusResponse, ClientError> {
        self.run_status(run_id).await
    }

    async fn output(&self, run_id: &str) -> Result<OutputResponse, ClientError> {
        self.run_output(run_id).await
    }

    async fn refresh(&self) -> Result<OutputResponse, ClientError> {
        self.refresh_insights().await
    }
}
