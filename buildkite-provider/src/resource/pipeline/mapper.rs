//! Translation between pipeline records and Buildkite payloads
//!
//! Both directions copy every field explicitly. Maps default to empty and
//! lists keep their order, so a record survives a round trip through the API
//! unchanged.

use buildkite_core::domain::pipeline::{Pipeline, Step};
use buildkite_core::dto::pipeline::PipelineRequest;
use buildkite_core::error::Result;
use buildkite_core::{Attributes, ResourceData};

use super::schema::*;

/// Builds the request body for a create or update from the record
pub fn prepare_request_payload(data: &ResourceData) -> Result<PipelineRequest> {
    let attrs = data.attributes();

    let steps = attrs
        .get_blocks(PIPELINE_STEPS)?
        .iter()
        .map(step_from_block)
        .collect::<Result<Vec<_>>>()?;

    Ok(PipelineRequest {
        name: attrs.get_string(PIPELINE_NAME)?,
        slug: attrs.get_string(PIPELINE_SLUG)?,
        repository: attrs.get_string(PIPELINE_REPOSITORY)?,
        description: attrs.get_string(PIPELINE_DESCRIPTION)?,
        default_branch: attrs.get_string(PIPELINE_DEFAULT_BRANCH)?,
        branch_configuration: attrs.get_string(PIPELINE_BRANCH_CONFIGURATION)?,
        env: attrs.get_string_map(PIPELINE_ENV)?,
        provider_settings: attrs.get_bool_map(PIPELINE_PROVIDER_SETTINGS)?,
        steps,
    })
}

fn step_from_block(block: &Attributes) -> Result<Step> {
    Ok(Step {
        step_type: block.get_string(STEP_TYPE)?,
        name: block.get_string(STEP_NAME)?,
        command: block.get_string(STEP_COMMAND)?,
        env: block.get_string_map(STEP_ENV)?,
        timeout_in_minutes: block.get_u32(STEP_TIMEOUT_IN_MINUTES)?,
        agent_query_rules: block.get_string_list(STEP_AGENT_QUERY_RULES)?,
        artifact_paths: block.get_string(STEP_ARTIFACT_PATHS)?,
        branch_configuration: block.get_string(STEP_BRANCH_CONFIGURATION)?,
        concurrency: block.get_u32(STEP_CONCURRENCY)?,
        parallelism: block.get_u32(STEP_PARALLELISM)?,
    })
}

/// Rewrites the record from a pipeline returned by the API
///
/// The record's id becomes the pipeline slug.
pub fn update_from_api(data: &mut ResourceData, pipeline: &Pipeline) -> Result<()> {
    data.set_id(pipeline.slug.as_str());

    let attrs = data.attributes_mut();
    attrs.set(PIPELINE_ID, &pipeline.id)?;
    attrs.set(PIPELINE_SLUG, &pipeline.slug)?;
    attrs.set(PIPELINE_URL, &pipeline.url)?;
    attrs.set(PIPELINE_WEB_URL, &pipeline.web_url)?;
    attrs.set(PIPELINE_BUILDS_URL, &pipeline.builds_url)?;
    attrs.set(PIPELINE_BADGE_URL, &pipeline.badge_url)?;
    attrs.set(PIPELINE_CREATED_AT, &pipeline.created_at)?;
    attrs.set(PIPELINE_WEBHOOK_URL, &pipeline.provider.webhook_url)?;
    attrs.set(PIPELINE_NAME, &pipeline.name)?;
    attrs.set(PIPELINE_DESCRIPTION, &pipeline.description)?;
    attrs.set(PIPELINE_REPOSITORY, &pipeline.repository)?;
    attrs.set(PIPELINE_BRANCH_CONFIGURATION, &pipeline.branch_configuration)?;
    attrs.set(PIPELINE_DEFAULT_BRANCH, &pipeline.default_branch)?;
    attrs.set(PIPELINE_ENV, &pipeline.env)?;
    attrs.set(
        PIPELINE_PROVIDER_SETTINGS,
        &pipeline.provider.bool_settings(),
    )?;

    let steps = pipeline
        .steps
        .iter()
        .map(block_from_step)
        .collect::<Result<Vec<_>>>()?;
    attrs.set_blocks(PIPELINE_STEPS, steps);

    Ok(())
}

fn block_from_step(step: &Step) -> Result<Attributes> {
    let mut block = Attributes::new();
    block.set(STEP_TYPE, &step.step_type)?;
    block.set(STEP_NAME, &step.name)?;
    block.set(STEP_COMMAND, &step.command)?;
    block.set(STEP_ENV, &step.env)?;
    block.set(STEP_TIMEOUT_IN_MINUTES, &step.timeout_in_minutes)?;
    block.set(STEP_AGENT_QUERY_RULES, &step.agent_query_rules)?;
    block.set(STEP_ARTIFACT_PATHS, &step.artifact_paths)?;
    block.set(STEP_BRANCH_CONFIGURATION, &step.branch_configuration)?;
    block.set(STEP_CONCURRENCY, &step.concurrency)?;
    block.set(STEP_PARALLELISM, &step.parallelism)?;
    Ok(block)
}
