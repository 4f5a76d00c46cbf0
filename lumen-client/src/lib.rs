//! Lumen Workspace Client
//!
//! A simple, type-safe HTTP client for the dashboard's workspace API:
//! the service that triggers remote pipeline and notebook runs, reports
//! their lifecycle, and serves materialized insights.
//!
//! This crate only knows how to speak the wire protocol. The poll loop,
//! attempt budgets and cancellation live in `lumen-tracker`.
//!
//! # Example
//!
//! ```no_run
//! use lumen_client::WorkspaceClient;
//! use lumen_core::domain::job::JobKind;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = WorkspaceClient::new("http://localhost:5000");
//!
//!     let trigger = client
//!         .trigger_job(JobKind::Pipeline, &json!({"pipeline_type": "full"}))
//!         .await?;
//!
//!     println!("Run started: {:?}", trigger.run_id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod insights;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the workspace API
///
/// Provides one method per endpoint the job tracker consumes:
/// - Trigger a pipeline or notebook run
/// - Query a run's lifecycle status
/// - Fetch a finished run's output
/// - Refresh the latest materialized insights (synchronous path)
#[derive(Debug, Clone)]
pub struct WorkspaceClient {
    /// Base URL of the workspace API (e.g., "http://localhost:5000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl WorkspaceClient {
    /// Create a new workspace client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the workspace API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new workspace client with a custom HTTP client
    ///
    /// Allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the workspace API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the HTTP status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful. An
    /// unrecognized `status` discriminator in the body fails deserialization
    /// and therefore surfaces as a `ParseError`.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WorkspaceClient::new("http://localhost:5000");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = WorkspaceClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = WorkspaceClient::with_client("http://localhost:5000", http_client);
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
