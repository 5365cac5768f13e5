//! Pipeline API seam
//!
//! Resources talk to Buildkite through [`PipelineApi`] rather than the HTTP
//! client directly, so resource logic can be exercised without a server.

use async_trait::async_trait;
use buildkite_client::{BuildkiteClient, Result};
use buildkite_core::domain::pipeline::Pipeline;
use buildkite_core::dto::pipeline::PipelineRequest;

/// Pipeline CRUD operations against the Buildkite API
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Creates a pipeline and returns it as stored remotely
    async fn create_pipeline(&self, req: &PipelineRequest) -> Result<Pipeline>;

    /// Fetches a pipeline by slug
    async fn get_pipeline(&self, slug: &str) -> Result<Pipeline>;

    /// Replaces the definition of an existing pipeline
    async fn update_pipeline(&self, slug: &str, req: &PipelineRequest) -> Result<Pipeline>;

    /// Deletes a pipeline by slug
    async fn delete_pipeline(&self, slug: &str) -> Result<()>;
}

#[async_trait]
impl PipelineApi for BuildkiteClient {
    async fn create_pipeline(&self, req: &PipelineRequest) -> Result<Pipeline> {
        BuildkiteClient::create_pipeline(self, req).await
    }

    async fn get_pipeline(&self, slug: &str) -> Result<Pipeline> {
        BuildkiteClient::get_pipeline(self, slug).await
    }

    async fn update_pipeline(&self, slug: &str, req: &PipelineRequest) -> Result<Pipeline> {
        BuildkiteClient::update_pipeline(self, slug, req).await
    }

    async fn delete_pipeline(&self, slug: &str) -> Result<()> {
        BuildkiteClient::delete_pipeline(self, slug).await
    }
}
