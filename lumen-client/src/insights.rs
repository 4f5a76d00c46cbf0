//! Insights refresh endpoint

use lumen_core::dto::insights::OutputResponse;

use crate::WorkspaceClient;
use crate::error::Result;

impl WorkspaceClient {
    /// Refresh the latest materialized insights
    ///
    /// Synchronous alternate path: pulls whatever a prior completed run
    /// already materialized, bypassing trigger and polling entirely.
    pub async fn refresh_insights(&self) -> Result<OutputResponse> {
        let url = format!("{}/api/insights/refresh", self.base_url);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }
}
