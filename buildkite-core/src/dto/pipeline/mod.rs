//! Pipeline DTOs for the Buildkite REST API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::pipeline::Step;

/// Request body for creating or updating a pipeline
///
/// Empty strings are omitted. `env`, `provider_settings` and `steps` are
/// always sent so an update can clear them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_branch: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub branch_configuration: String,
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default)]
    pub provider_settings: HashMap<String, bool>,
    #[serde(default)]
    pub steps: Vec<Step>,
}
