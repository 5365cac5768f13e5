//! `buildkite_pipeline` resource
//!
//! Maps a pipeline record onto the Buildkite pipeline endpoints. Steps are
//! always sent in full; Buildkite replaces the step list wholesale.

mod mapper;
pub mod schema;

pub use mapper::{prepare_request_payload, update_from_api};

use async_trait::async_trait;
use buildkite_core::{ResourceData, Schema};
use tracing::{debug, info, warn};

use crate::api::PipelineApi;
use crate::error::{ProviderError, Result};
use crate::resource::Resource;

/// Type name of the pipeline resource
pub const PIPELINE_RESOURCE: &str = "buildkite_pipeline";

/// Pipeline resource backed by a [`PipelineApi`]
#[derive(Debug, Clone)]
pub struct PipelineResource<A> {
    api: A,
}

impl<A: PipelineApi> PipelineResource<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

/// Slug of a record that must already exist remotely
fn require_id(data: &ResourceData) -> Result<String> {
    if !data.has_id() {
        return Err(ProviderError::MissingId);
    }
    Ok(data.id().to_string())
}

#[async_trait]
impl<A: PipelineApi> Resource for PipelineResource<A> {
    fn type_name(&self) -> &'static str {
        PIPELINE_RESOURCE
    }

    fn schema(&self) -> Schema {
        schema::pipeline_schema()
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        debug!("creating pipeline");

        self.schema().validate(data.attributes())?;
        let req = prepare_request_payload(data)?;
        let res = self.api.create_pipeline(&req).await?;

        update_from_api(data, &res)?;
        info!(slug = %res.slug, steps = res.steps.len(), "pipeline created");

        Ok(())
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let slug = require_id(data)?;
        debug!(%slug, "reading pipeline");

        let res = match self.api.get_pipeline(&slug).await {
            Ok(res) => res,
            Err(e) if e.is_not_found() => {
                warn!(%slug, "pipeline no longer exists, removing from state");
                data.set_id("");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        update_from_api(data, &res)?;

        Ok(())
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        let slug = require_id(data)?;
        debug!(%slug, "updating pipeline");

        self.schema().validate(data.attributes())?;
        let req = prepare_request_payload(data)?;
        let res = self.api.update_pipeline(&slug, &req).await?;

        update_from_api(data, &res)?;
        info!(slug = %res.slug, steps = res.steps.len(), "pipeline updated");

        Ok(())
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let slug = require_id(data)?;
        debug!(%slug, "deleting pipeline");

        self.api.delete_pipeline(&slug).await?;

        data.set_id("");
        info!(%slug, "pipeline deleted");

        Ok(())
    }
}
