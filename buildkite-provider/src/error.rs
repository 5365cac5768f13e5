//! Error types for provider operations

use buildkite_client::ClientError;
use buildkite_core::StateError;
use thiserror::Error;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors surfaced to the host by resource operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The record could not be read, written or validated
    #[error(transparent)]
    State(#[from] StateError),

    /// The Buildkite API call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The operation needs a remote identity but the record has none
    #[error("resource has no id; it must be created or imported first")]
    MissingId,

    /// Provider configuration is unusable
    #[error("invalid provider configuration: {0}")]
    Config(String),
}

impl ProviderError {
    /// Check if the remote object is gone
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Client(err) if err.is_not_found())
    }
}
