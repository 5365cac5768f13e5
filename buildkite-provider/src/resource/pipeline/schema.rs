//! `buildkite_pipeline` attribute names and schema

use buildkite_core::{Attribute, AttributeType, Schema};

pub const PIPELINE_ID: &str = "id";
pub const PIPELINE_SLUG: &str = "slug";
pub const PIPELINE_URL: &str = "url";
pub const PIPELINE_WEB_URL: &str = "web_url";
pub const PIPELINE_BUILDS_URL: &str = "builds_url";
pub const PIPELINE_BADGE_URL: &str = "badge_url";
pub const PIPELINE_CREATED_AT: &str = "created_at";
pub const PIPELINE_WEBHOOK_URL: &str = "webhook_url";
pub const PIPELINE_NAME: &str = "name";
pub const PIPELINE_DESCRIPTION: &str = "description";
pub const PIPELINE_REPOSITORY: &str = "repository";
pub const PIPELINE_BRANCH_CONFIGURATION: &str = "branch_configuration";
pub const PIPELINE_DEFAULT_BRANCH: &str = "default_branch";
pub const PIPELINE_ENV: &str = "env";
pub const PIPELINE_PROVIDER_SETTINGS: &str = "provider_settings";
pub const PIPELINE_STEPS: &str = "step";

pub const STEP_TYPE: &str = "type";
pub const STEP_NAME: &str = "name";
pub const STEP_COMMAND: &str = "command";
pub const STEP_ENV: &str = "env";
pub const STEP_TIMEOUT_IN_MINUTES: &str = "timeout_in_minutes";
pub const STEP_AGENT_QUERY_RULES: &str = "agent_query_rules";
pub const STEP_ARTIFACT_PATHS: &str = "artifact_paths";
pub const STEP_BRANCH_CONFIGURATION: &str = "branch_configuration";
pub const STEP_CONCURRENCY: &str = "concurrency";
pub const STEP_PARALLELISM: &str = "parallelism";

/// Schema of one `step` block
pub fn step_schema() -> Schema {
    use AttributeType::{Int, String};

    Schema::new()
        .attribute(STEP_TYPE, Attribute::required(String))
        .attribute(STEP_NAME, Attribute::optional(String))
        .attribute(STEP_COMMAND, Attribute::optional(String))
        .attribute(STEP_ENV, Attribute::optional(AttributeType::map_of(String)))
        .attribute(STEP_TIMEOUT_IN_MINUTES, Attribute::optional(Int))
        .attribute(
            STEP_AGENT_QUERY_RULES,
            Attribute::optional(AttributeType::list_of(String)),
        )
        .attribute(STEP_ARTIFACT_PATHS, Attribute::optional(String))
        .attribute(STEP_BRANCH_CONFIGURATION, Attribute::optional(String))
        .attribute(STEP_CONCURRENCY, Attribute::optional(Int))
        .attribute(STEP_PARALLELISM, Attribute::optional(Int))
}

/// Schema of the `buildkite_pipeline` resource
pub fn pipeline_schema() -> Schema {
    use AttributeType::{Bool, String};

    Schema::new()
        .attribute(PIPELINE_ID, Attribute::computed(String))
        .attribute(PIPELINE_SLUG, Attribute::optional_computed(String))
        .attribute(PIPELINE_URL, Attribute::computed(String))
        .attribute(PIPELINE_WEB_URL, Attribute::computed(String))
        .attribute(PIPELINE_BUILDS_URL, Attribute::computed(String))
        .attribute(PIPELINE_BADGE_URL, Attribute::computed(String))
        .attribute(PIPELINE_CREATED_AT, Attribute::computed(String))
        .attribute(PIPELINE_WEBHOOK_URL, Attribute::computed(String))
        .attribute(PIPELINE_NAME, Attribute::required(String))
        .attribute(PIPELINE_DESCRIPTION, Attribute::optional(String))
        .attribute(PIPELINE_REPOSITORY, Attribute::required(String))
        .attribute(PIPELINE_BRANCH_CONFIGURATION, Attribute::optional(String))
        .attribute(PIPELINE_DEFAULT_BRANCH, Attribute::optional(String))
        .attribute(PIPELINE_ENV, Attribute::optional(AttributeType::map_of(String)))
        .attribute(
            PIPELINE_PROVIDER_SETTINGS,
            Attribute::optional(AttributeType::map_of(Bool)),
        )
        .attribute(
            PIPELINE_STEPS,
            Attribute::required(AttributeType::Block(step_schema())),
        )
}
