//! Data Transfer Objects for the Buildkite REST API
//!
//! Request payloads sent by the provider. Responses decode into the
//! domain types.

pub mod pipeline;
