//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod pipeline;

pub use pipeline::PipelineCommands;

use anyhow::{Context, Result};
use buildkite_provider::resource::pipeline::schema::pipeline_schema;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline lifecycle against the state file
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Print the pipeline resource schema as JSON
    Schema,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, config).await,
        Commands::Schema => {
            let schema = serde_json::to_string_pretty(&pipeline_schema())
                .context("Failed to encode schema")?;
            println!("{}", schema);
            Ok(())
        }
    }
}
