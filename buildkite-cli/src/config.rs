//! Configuration module
//!
//! Handles CLI configuration: API connection settings and the state file
//! location.

use std::path::PathBuf;

use anyhow::{Context, Result};
use buildkite_provider::ProviderConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Buildkite REST API URL
    pub api_url: String,
    /// Organization slug, required by commands that call the API
    pub organization: Option<String>,
    /// API access token, required by commands that call the API
    pub api_token: Option<String>,
    /// Resource state file
    pub state_path: PathBuf,
}

impl Config {
    /// Provider settings for commands that talk to Buildkite
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let organization = self
            .organization
            .clone()
            .context("organization is required (--organization or BUILDKITE_ORGANIZATION)")?;
        let api_token = self
            .api_token
            .clone()
            .context("API token is required (--api-token or BUILDKITE_API_TOKEN)")?;

        Ok(ProviderConfig::new(organization, api_token).with_api_url(self.api_url.clone()))
    }
}
