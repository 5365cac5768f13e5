//! Buildkite CLI
//!
//! Local host for the Buildkite pipeline provider. Keeps one pipeline record
//! in a JSON state file and drives it through create, read, update, delete
//! and import against the Buildkite API.

mod commands;
mod config;
mod state;

use std::path::PathBuf;

use anyhow::Result;
use buildkite_provider::DEFAULT_API_URL;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "buildkite")]
#[command(about = "Manage Buildkite pipelines from declarative state", long_about = None)]
struct Cli {
    /// Buildkite REST API URL
    #[arg(
        long,
        global = true,
        env = "BUILDKITE_API_URL",
        default_value_t = DEFAULT_API_URL.to_string()
    )]
    api_url: String,

    /// Organization slug
    #[arg(long, global = true, env = "BUILDKITE_ORGANIZATION")]
    organization: Option<String>,

    /// API access token
    #[arg(long, global = true, env = "BUILDKITE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Path of the resource state file
    #[arg(
        long,
        global = true,
        env = "BUILDKITE_STATE",
        default_value = "pipeline.tfstate.json"
    )]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "buildkite=info,buildkite_provider=info,buildkite_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        organization: cli.organization,
        api_token: cli.api_token,
        state_path: cli.state,
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_defaults() {
        let cli = Cli::try_parse_from(["buildkite", "schema"]).unwrap();

        assert_eq!(cli.api_url, DEFAULT_API_URL);
        assert_eq!(cli.state, PathBuf::from("pipeline.tfstate.json"));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "buildkite",
            "pipeline",
            "import",
            "deploy",
            "--api-url",
            "http://localhost:8080",
            "--state",
            "deploy.json",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://localhost:8080");
        assert_eq!(cli.state, PathBuf::from("deploy.json"));
    }
}
