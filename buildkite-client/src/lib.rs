//! Buildkite HTTP Client
//!
//! A small, type-safe client for the pipeline endpoints of the Buildkite
//! REST API (v2).
//!
//! # Example
//!
//! ```no_run
//! use buildkite_client::BuildkiteClient;
//! use buildkite_core::dto::pipeline::PipelineRequest;
//!
//! # async fn example() -> buildkite_client::Result<()> {
//! let client = BuildkiteClient::new("https://api.buildkite.com/v2", "acme", "bkua_token");
//!
//! let pipeline = client
//!     .create_pipeline(&PipelineRequest {
//!         name: "Deploy".to_string(),
//!         repository: "git@github.com:acme/deploy.git".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! println!("Created pipeline: {}", pipeline.slug);
//! # Ok(())
//! # }
//! ```

pub mod error;
mod pipelines;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;

/// Default Buildkite REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.buildkite.com/v2";

/// HTTP client for the Buildkite REST API
///
/// All paths are scoped to one organization and every request carries the
/// API token as a bearer credential.
#[derive(Clone)]
pub struct BuildkiteClient {
    /// Base URL of the API (e.g., "https://api.buildkite.com/v2")
    base_url: String,
    /// Organization slug the pipelines belong to
    organization: String,
    /// API access token
    token: String,
    /// HTTP client instance
    client: Client,
}

impl BuildkiteClient {
    /// Create a new Buildkite client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "https://api.buildkite.com/v2")
    /// * `organization` - The organization slug
    /// * `token` - An API access token with pipeline read/write scopes
    ///
    /// # Example
    /// ```
    /// use buildkite_client::BuildkiteClient;
    ///
    /// let client = BuildkiteClient::new("https://api.buildkite.com/v2", "acme", "token");
    /// ```
    pub fn new(
        base_url: impl Into<String>,
        organization: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::with_client(base_url, organization, token, Client::new())
    }

    /// Create a new Buildkite client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use buildkite_client::BuildkiteClient;
    /// use reqwest::{Client, Url};
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BuildkiteClient::with_client(
    ///     "https://api.buildkite.com/v2",
    ///     "acme",
    ///     "token",
    ///     http_client,
    /// );
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        organization: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            organization: organization.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the organization slug
    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// Absolute URL of an organization-scoped path
    ///
    /// Each segment is percent-encoded, so a slug such as `deploy?x` stays a
    /// single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["organizations", self.organization.as_str()])
            .extend(segments);
        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// A 404 becomes [`ClientError::NotFound`]; any other non-2xx status becomes
    /// [`ClientError::ApiError`] carrying the response body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(response.url().path().to_string()));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::api_error(status.as_u16(), error_text))
    }
}

impl fmt::Debug for BuildkiteClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildkiteClient")
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("token", &"<redacted>")
            .finish()
    }
}
