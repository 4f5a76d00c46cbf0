//! Refresh command handler

use anyhow::Result;
use colored::*;
use lumen_client::WorkspaceClient;
use lumen_tracker::JobLauncher;

use crate::config::Config;

/// Pull and print the latest materialized insights
pub async fn handle_refresh(config: &Config) -> Result<()> {
    let client = WorkspaceClient::new(&config.workspace_url);
    let launcher = JobLauncher::new(client, config.tracker());

    let payload = launcher.refresh().await?;

    println!("{}", "Latest insights:".bold());
    println!("{}", serde_json::to_string_pretty(&payload.into_inner())?);

    Ok(())
}
