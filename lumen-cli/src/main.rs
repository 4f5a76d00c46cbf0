//! Lumen CLI
//!
//! Command-line front end for the Lumen job tracker: triggers remote
//! pipeline and notebook runs, renders their status stream, and prints
//! the resulting insights. It is the display collaborator of the tracker;
//! it consumes snapshots and never drives the poll loop.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Trigger and watch remote analytics jobs", long_about = None)]
struct Cli {
    /// Workspace API URL
    #[arg(
        long,
        env = "LUMEN_WORKSPACE_URL",
        default_value = "http://localhost:5000"
    )]
    workspace_url: String,

    /// Seconds between status checks
    #[arg(long, env = "LUMEN_POLL_INTERVAL", default_value = "5")]
    poll_interval: u64,

    /// Status checks before giving up on a run
    #[arg(long, env = "LUMEN_MAX_ATTEMPTS", default_value = "60")]
    max_attempts: u32,

    /// Consecutive status-check errors to tolerate
    #[arg(long, env = "LUMEN_ERROR_BUDGET", default_value = "0")]
    error_budget: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lumen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        workspace_url: cli.workspace_url,
        poll_interval: std::time::Duration::from_secs(cli.poll_interval),
        max_attempts: cli.max_attempts,
        error_budget: cli.error_budget,
    };

    // Reject bad settings here; a zero interval would otherwise panic
    // inside the spawned poll task instead of surfacing as an error
    config.tracker().validate()?;

    handle_command(cli.command, &config).await
}
