//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod insights;
mod run;

pub use run::RunCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Trigger a remote run and watch it to completion
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Pull the latest materialized insights without launching anything
    Refresh,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Run { command } => run::handle_run_command(command, config).await,
        Commands::Refresh => insights::handle_refresh(config).await,
    }
}
