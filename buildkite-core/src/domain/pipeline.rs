//! Pipeline domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{is_zero, null_as_default};

/// Pipeline as returned by the Buildkite API
///
/// Identity is the `slug`, assigned by Buildkite on creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub web_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub branch_configuration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_branch: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub env: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: PipelineProvider,
    #[serde(default, deserialize_with = "null_as_default")]
    pub builds_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub badge_url: String,
    /// Creation time exactly as rendered by the API
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<Step>,
}

/// Source provider integration of a pipeline (GitHub, Bitbucket, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineProvider {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Provider settings; Buildkite mixes booleans with strings and numbers here
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: HashMap<String, serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub webhook_url: String,
}

impl PipelineProvider {
    /// Boolean-valued settings only
    pub fn bool_settings(&self) -> HashMap<String, bool> {
        self.settings
            .iter()
            .filter_map(|(key, value)| value.as_bool().map(|b| (key.clone(), b)))
            .collect()
    }
}

/// One step of a pipeline
///
/// Steps have no identity of their own; the full ordered list is sent with
/// every create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub step_type: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub command: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub env: HashMap<String, String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub timeout_in_minutes: u32,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub agent_query_rules: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub artifact_paths: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub branch_configuration: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub concurrency: u32,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub parallelism: u32,
}
