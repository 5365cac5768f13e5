//! Pipeline-related API endpoints

use crate::BuildkiteClient;
use crate::error::Result;
use buildkite_core::domain::pipeline::Pipeline;
use buildkite_core::dto::pipeline::PipelineRequest;
use tracing::debug;

impl BuildkiteClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// Create a new pipeline
    ///
    /// # Arguments
    /// * `req` - The full pipeline definition, steps included
    ///
    /// # Returns
    /// The created pipeline, with its server-assigned slug and URLs
    pub async fn create_pipeline(&self, req: &PipelineRequest) -> Result<Pipeline> {
        let url = self.url(&["pipelines"])?;
        debug!(%url, steps = req.steps.len(), "POST pipeline");
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a pipeline by slug
    ///
    /// # Arguments
    /// * `slug` - The pipeline slug
    ///
    /// # Returns
    /// The pipeline details, or [`ClientError::NotFound`](crate::ClientError::NotFound)
    /// when it no longer exists
    pub async fn get_pipeline(&self, slug: &str) -> Result<Pipeline> {
        let url = self.url(&["pipelines", slug])?;
        debug!(%url, "GET pipeline");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Update a pipeline
    ///
    /// The request replaces the pipeline definition, including the whole
    /// step list.
    ///
    /// # Arguments
    /// * `slug` - The pipeline slug
    /// * `req` - The full pipeline definition
    pub async fn update_pipeline(&self, slug: &str, req: &PipelineRequest) -> Result<Pipeline> {
        let url = self.url(&["pipelines", slug])?;
        debug!(%url, steps = req.steps.len(), "PATCH pipeline");
        let response = self
            .client
            .patch(url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a pipeline
    ///
    /// # Arguments
    /// * `slug` - The pipeline slug to delete
    pub async fn delete_pipeline(&self, slug: &str) -> Result<()> {
        let url = self.url(&["pipelines", slug])?;
        debug!(%url, "DELETE pipeline");
        let response = self
            .client
            .delete(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
