//! Buildkite Provider
//!
//! Resource provider that manages Buildkite pipelines from declarative
//! configuration.
//!
//! Architecture:
//! - Configuration: API endpoint, organization and token, from the environment
//! - API seam: [`PipelineApi`], implemented by the HTTP client
//! - Resources: record <-> payload mapping plus create/read/update/delete/import
//!
//! # Example
//!
//! ```no_run
//! use buildkite_provider::{Provider, ProviderConfig, Resource};
//!
//! # async fn example() -> buildkite_provider::Result<()> {
//! let provider = Provider::new(ProviderConfig::from_env()?)?;
//! let pipelines = provider.pipeline();
//!
//! let mut data = pipelines.import("deploy")?;
//! pipelines.read(&mut data).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod provider;
pub mod resource;

pub use api::PipelineApi;
pub use buildkite_client::DEFAULT_API_URL;
pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use provider::Provider;
pub use resource::{PipelineResource, Resource};
