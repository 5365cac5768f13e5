//! Provider configuration
//!
//! Connection settings for the Buildkite API: which endpoint to talk to,
//! which organization owns the pipelines, and the token to authenticate with.

use std::fmt;

use buildkite_client::DEFAULT_API_URL;

use crate::error::{ProviderError, Result};

/// Provider configuration
#[derive(Clone)]
pub struct ProviderConfig {
    /// API base URL (e.g., "https://api.buildkite.com/v2")
    pub api_url: String,

    /// Organization slug that owns the managed pipelines
    pub organization: String,

    /// API access token
    pub api_token: String,
}

impl ProviderConfig {
    /// Creates a new configuration against the public Buildkite API
    pub fn new(organization: String, api_token: String) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            organization,
            api_token,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - BUILDKITE_ORGANIZATION (required)
    /// - BUILDKITE_API_TOKEN (required)
    /// - BUILDKITE_API_URL (optional, default: https://api.buildkite.com/v2)
    pub fn from_env() -> Result<Self> {
        let organization = std::env::var("BUILDKITE_ORGANIZATION").map_err(|_| {
            ProviderError::Config("BUILDKITE_ORGANIZATION environment variable not set".into())
        })?;

        let api_token = std::env::var("BUILDKITE_API_TOKEN").map_err(|_| {
            ProviderError::Config("BUILDKITE_API_TOKEN environment variable not set".into())
        })?;

        let api_url = std::env::var("BUILDKITE_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            api_url,
            organization,
            api_token,
        })
    }

    /// Overrides the API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            return Err(ProviderError::Config("organization cannot be empty".into()));
        }

        if self.api_token.trim().is_empty() {
            return Err(ProviderError::Config("api_token cannot be empty".into()));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ProviderError::Config(
                "api_url must start with http:// or https://".into(),
            ));
        }

        Ok(())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("organization", &self.organization)
            .field("api_token", &"<redacted>")
            .finish()
    }
}
