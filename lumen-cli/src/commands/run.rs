//! Run command handlers
//!
//! Triggers a pipeline or notebook run, renders every status snapshot as
//! it arrives, and prints the fetched insights once the run succeeds.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use lumen_client::WorkspaceClient;
use lumen_core::domain::job::{JobKind, JobState, StatusSnapshot};
use lumen_tracker::{JobLauncher, JobOutcome};
use serde_json::json;

use crate::config::Config;

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// Run the data pipeline
    Pipeline {
        /// Pipeline variant to trigger
        #[arg(long, default_value = "full")]
        pipeline_type: String,
    },
    /// Run the insights notebook
    Notebook {
        /// Workspace path of the notebook to execute
        #[arg(long)]
        notebook_path: Option<String>,
    },
}

/// Handle run commands
pub async fn handle_run_command(command: RunCommands, config: &Config) -> Result<()> {
    let (kind, params) = match command {
        RunCommands::Pipeline { pipeline_type } => (
            JobKind::Pipeline,
            json!({ "pipeline_type": pipeline_type }),
        ),
        RunCommands::Notebook { notebook_path } => (
            JobKind::Notebook,
            json!({ "notebook_path": notebook_path }),
        ),
    };

    let client = WorkspaceClient::new(&config.workspace_url);
    let mut launcher = JobLauncher::new(client, config.tracker());

    let mut watch = launcher.launch(kind, params).await?;
    println!(
        "{}",
        format!("Watching {} run {}", kind, watch.handle.run_id).bold()
    );

    while let Some(snapshot) = watch.next_snapshot().await {
        print_snapshot(&snapshot);
    }

    match watch.outcome().await {
        JobOutcome::Success(payload) => {
            println!();
            println!("{}", "Run output:".bold());
            println!("{}", serde_json::to_string_pretty(&payload.into_inner())?);
            Ok(())
        }
        JobOutcome::Failed(err) => Err(err.into()),
        JobOutcome::TimedOut { attempts } => {
            anyhow::bail!("run still in progress after {attempts} status checks")
        }
        JobOutcome::Cancelled => {
            println!("{}", "Run cancelled.".yellow());
            Ok(())
        }
    }
}

/// Print one status snapshot
fn print_snapshot(snapshot: &StatusSnapshot) {
    let state = colorize_state(snapshot.state);
    let detail = if snapshot.lifecycle_state.is_empty() {
        snapshot.message.clone()
    } else {
        format!(
            "{}{}: {}",
            snapshot.lifecycle_state,
            snapshot
                .result_state
                .as_deref()
                .map(|r| format!("/{r}"))
                .unwrap_or_default(),
            snapshot.message
        )
    };

    println!("  {} [{:>2}] {} {}", "▸".cyan(), snapshot.attempt, state, detail);
}

/// Color a job state for terminal output
fn colorize_state(state: JobState) -> ColoredString {
    match state {
        JobState::Idle => "idle".dimmed(),
        JobState::Starting => "starting".cyan(),
        JobState::Running => "running".yellow(),
        JobState::Success => "success".green().bold(),
        JobState::Failed => "failed".red().bold(),
        JobState::Timeout => "timeout".red(),
        JobState::Cancelled => "cancelled".dimmed(),
    }
}
