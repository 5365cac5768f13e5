//! Pipeline command handlers
//!
//! Each command loads the record from the state file, runs one resource
//! operation, and writes the record back.

use anyhow::{Result, bail};
use buildkite_core::ResourceData;
use buildkite_core::domain::parse_timestamp;
use buildkite_provider::resource::pipeline::schema::*;
use buildkite_provider::{Provider, Resource};
use clap::Subcommand;
use colored::*;
use tracing::debug;

use crate::config::Config;
use crate::state;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Create the pipeline described by the state file
    Create,
    /// Refresh the state file from Buildkite
    Read,
    /// Push the state file's configuration to Buildkite
    Update,
    /// Delete the pipeline and clear its id from the state file
    Delete,
    /// Start tracking an existing pipeline
    Import {
        /// Pipeline slug
        slug: String,
    },
}

/// Handle pipeline commands
///
/// Routes pipeline subcommands to their respective handlers.
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let provider = Provider::new(config.provider_config()?)?;
    let resource = provider.pipeline();
    let path = config.state_path.as_path();
    debug!(state = %path.display(), "using state file");

    match command {
        PipelineCommands::Create => {
            let mut data = state::load(path)?;
            if data.has_id() {
                bail!(
                    "State already tracks pipeline '{}'; use `update` instead",
                    data.id()
                );
            }

            resource.create(&mut data).await?;
            state::save(path, &data)?;

            println!("{}", "✓ Pipeline created successfully!".green().bold());
            print_pipeline_details(&data);
        }
        PipelineCommands::Read => {
            let mut data = state::load(path)?;
            let slug = data.id().to_string();

            resource.read(&mut data).await?;
            state::save(path, &data)?;

            if data.has_id() {
                print_pipeline_details(&data);
            } else {
                println!(
                    "{}",
                    format!("Pipeline '{}' no longer exists; removed from state.", slug).yellow()
                );
            }
        }
        PipelineCommands::Update => {
            let mut data = state::load(path)?;

            resource.update(&mut data).await?;
            state::save(path, &data)?;

            println!("{}", "✓ Pipeline updated successfully!".green().bold());
            print_pipeline_details(&data);
        }
        PipelineCommands::Delete => {
            let mut data = state::load(path)?;
            let slug = data.id().to_string();

            resource.delete(&mut data).await?;
            state::save(path, &data)?;

            println!(
                "{}",
                format!("✓ Pipeline {} deleted successfully!", slug)
                    .green()
                    .bold()
            );
        }
        PipelineCommands::Import { slug } => {
            let mut data = resource.import(&slug)?;

            resource.read(&mut data).await?;
            if !data.has_id() {
                bail!("No pipeline found with slug '{}'", slug);
            }
            state::save(path, &data)?;

            println!("{}", "✓ Pipeline imported successfully!".green().bold());
            print_pipeline_details(&data);
        }
    }

    Ok(())
}

/// Print detailed pipeline information
fn print_pipeline_details(data: &ResourceData) {
    let attrs = data.attributes();
    let field = |key: &str| attrs.get_string(key).unwrap_or_default();

    println!("  Slug:        {}", data.id().cyan());
    println!("  Name:        {}", field(PIPELINE_NAME).bold());
    let description = field(PIPELINE_DESCRIPTION);
    if !description.is_empty() {
        println!("  Description: {}", description);
    }
    println!("  Repository:  {}", field(PIPELINE_REPOSITORY));
    println!("  Web URL:     {}", field(PIPELINE_WEB_URL).dimmed());
    println!("  Webhook URL: {}", field(PIPELINE_WEBHOOK_URL).dimmed());
    if let Some(created) = parse_timestamp(&field(PIPELINE_CREATED_AT)) {
        println!(
            "  Created:     {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }

    let steps = attrs.get_blocks(PIPELINE_STEPS).unwrap_or_default();
    println!("\n{}", format!("Steps ({}):", steps.len()).bold());
    for (i, step) in steps.iter().enumerate() {
        let step_type = step.get_string(STEP_TYPE).unwrap_or_default();
        let label = step.get_string(STEP_NAME).unwrap_or_default();
        let command = step.get_string(STEP_COMMAND).unwrap_or_default();
        println!(
            "  {} {:<8} {} {}",
            format!("{}.", i + 1).dimmed(),
            step_type.cyan(),
            label.bold(),
            command.dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PIPELINE_PATH: &str = "/organizations/acme/pipelines/deploy";

    fn config(server: &MockServer, state_path: &Path) -> Config {
        Config {
            api_url: server.uri(),
            organization: Some("acme".to_string()),
            api_token: Some("bkua_test_token".to_string()),
            state_path: state_path.to_path_buf(),
        }
    }

    fn deploy_body() -> Value {
        json!({
            "id": "0c9e2b1a-6c35-4f47-9a7c-6f8b1d2f3e4a",
            "url": "https://api.buildkite.com/v2/organizations/acme/pipelines/deploy",
            "web_url": "https://buildkite.com/acme/deploy",
            "name": "Deploy",
            "slug": "deploy",
            "repository": "git@github.com:acme/deploy.git",
            "provider": {
                "id": "github",
                "settings": { "build_tags": true },
                "webhook_url": "https://webhook.buildkite.com/deliver/abc"
            },
            "created_at": "2018-04-11T09:12:45.000Z",
            "steps": [{ "type": "script", "command": "make deploy" }]
        })
    }

    /// State file in a fresh directory, optionally pre-populated
    fn state_file(initial: Option<Value>) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.tfstate.json");
        if let Some(initial) = initial {
            std::fs::write(&path, initial.to_string()).unwrap();
        }
        (dir, path)
    }

    fn configuration() -> Value {
        json!({
            "attributes": {
                "name": "Deploy",
                "repository": "git@github.com:acme/deploy.git",
                "step": [{ "type": "script", "command": "make deploy" }]
            }
        })
    }

    fn tracked() -> Value {
        let mut state = configuration();
        state["id"] = json!("deploy");
        state
    }

    #[tokio::test]
    async fn test_create_writes_identity_to_state() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/organizations/acme/pipelines"))
            .respond_with(ResponseTemplate::new(201).set_body_json(deploy_body()))
            .expect(1)
            .mount(&server)
            .await;
        let (_dir, state_path) = state_file(Some(configuration()));

        handle_pipeline_command(PipelineCommands::Create, &config(&server, &state_path))
            .await
            .unwrap();

        let data = state::load(&state_path).unwrap();
        assert_eq!(data.id(), "deploy");
        assert_eq!(
            data.attributes().get_string(PIPELINE_CREATED_AT).unwrap(),
            "2018-04-11T09:12:45.000Z"
        );
    }

    #[tokio::test]
    async fn test_create_refuses_tracked_state() {
        let server = MockServer::start().await;
        let (_dir, state_path) = state_file(Some(tracked()));

        let err = handle_pipeline_command(PipelineCommands::Create, &config(&server, &state_path))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("already tracks pipeline 'deploy'"));
        assert!(server.received_requests().await.unwrap().is_empty());
        assert_eq!(state::load(&state_path).unwrap().id(), "deploy");
    }

    #[tokio::test]
    async fn test_read_saves_cleared_identity_when_pipeline_is_gone() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PIPELINE_PATH))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        let (_dir, state_path) = state_file(Some(tracked()));

        handle_pipeline_command(PipelineCommands::Read, &config(&server, &state_path))
            .await
            .unwrap();

        let data = state::load(&state_path).unwrap();
        assert!(!data.has_id());
        assert_eq!(data.attributes().get_string(PIPELINE_NAME).unwrap(), "Deploy");
    }

    #[tokio::test]
    async fn test_delete_clears_identity_in_state() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(PIPELINE_PATH))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        let (_dir, state_path) = state_file(Some(tracked()));

        handle_pipeline_command(PipelineCommands::Delete, &config(&server, &state_path))
            .await
            .unwrap();

        assert!(!state::load(&state_path).unwrap().has_id());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_state() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(PIPELINE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        let (_dir, state_path) = state_file(Some(tracked()));

        let result =
            handle_pipeline_command(PipelineCommands::Delete, &config(&server, &state_path)).await;

        assert!(result.is_err());
        assert_eq!(state::load(&state_path).unwrap().id(), "deploy");
    }

    #[tokio::test]
    async fn test_import_writes_refreshed_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PIPELINE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(deploy_body()))
            .expect(1)
            .mount(&server)
            .await;
        let (_dir, state_path) = state_file(None);

        let command = PipelineCommands::Import {
            slug: "deploy".to_string(),
        };
        handle_pipeline_command(command, &config(&server, &state_path))
            .await
            .unwrap();

        let data = state::load(&state_path).unwrap();
        assert_eq!(data.id(), "deploy");
        assert_eq!(
            data.attributes().get_string(PIPELINE_REPOSITORY).unwrap(),
            "git@github.com:acme/deploy.git"
        );
        assert_eq!(data.attributes().get_blocks(PIPELINE_STEPS).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_of_unknown_slug_writes_nothing() {
        let server = MockServer::start().await;
        let (_dir, state_path) = state_file(None);

        let command = PipelineCommands::Import {
            slug: "deploy?x".to_string(),
        };
        let err = handle_pipeline_command(command, &config(&server, &state_path))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("No pipeline found with slug 'deploy?x'"));
        assert!(!state_path.exists());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/organizations/acme/pipelines/deploy%3Fx");
    }
}
