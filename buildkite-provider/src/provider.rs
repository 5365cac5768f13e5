//! Provider entry point
//!
//! Owns the authenticated API client and hands out the resources the host
//! can manage.

use std::collections::BTreeMap;

use buildkite_client::BuildkiteClient;
use buildkite_core::Schema;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::resource::{PipelineResource, Resource};

/// Configured Buildkite provider
#[derive(Debug, Clone)]
pub struct Provider {
    client: BuildkiteClient,
}

impl Provider {
    /// Validates the configuration and builds the API client
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        debug!(api_url = %config.api_url, organization = %config.organization, "configuring provider");

        let client = BuildkiteClient::new(config.api_url, config.organization, config.api_token);
        Ok(Self { client })
    }

    pub fn client(&self) -> &BuildkiteClient {
        &self.client
    }

    /// The `buildkite_pipeline` resource
    pub fn pipeline(&self) -> PipelineResource<BuildkiteClient> {
        PipelineResource::new(self.client.clone())
    }

    /// Schemas of every resource type, keyed by type name
    pub fn resource_schemas(&self) -> BTreeMap<&'static str, Schema> {
        let pipeline = self.pipeline();
        BTreeMap::from([(pipeline.type_name(), pipeline.schema())])
    }
}
