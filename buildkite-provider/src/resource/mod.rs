//! Managed resources
//!
//! Each resource maps the host's record onto remote API calls. The host
//! drives a resource through [`Resource`] one operation at a time.

pub mod pipeline;

use async_trait::async_trait;
use buildkite_core::{ResourceData, Schema};

use crate::error::{ProviderError, Result};

pub use pipeline::PipelineResource;

/// Lifecycle of one resource type
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name the host configures the resource under
    fn type_name(&self) -> &'static str;

    /// Attribute contract of the resource
    fn schema(&self) -> Schema;

    /// Creates the remote object and fills the record from the response
    async fn create(&self, data: &mut ResourceData) -> Result<()>;

    /// Refreshes the record; clears its id if the remote object is gone
    async fn read(&self, data: &mut ResourceData) -> Result<()>;

    /// Pushes the full record to the remote object and refreshes it
    async fn update(&self, data: &mut ResourceData) -> Result<()>;

    /// Deletes the remote object and clears the record's id
    async fn delete(&self, data: &mut ResourceData) -> Result<()>;

    /// Starts tracking an existing remote object by id
    ///
    /// The returned record only carries the id; a subsequent [`read`](Self::read)
    /// fills in the attributes.
    fn import(&self, id: &str) -> Result<ResourceData> {
        if id.is_empty() {
            return Err(ProviderError::MissingId);
        }
        Ok(ResourceData::with_id(id))
    }
}
