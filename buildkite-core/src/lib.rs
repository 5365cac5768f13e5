//! Buildkite Core
//!
//! Core types shared by the Buildkite pipeline provider crates.
//!
//! This crate contains:
//! - Domain types: Pipelines and steps as the Buildkite REST API returns them
//! - DTOs: Request payloads sent to the Buildkite REST API
//! - State: The host's resource record (identity plus attribute map)
//! - Schema: The declarative attribute contract a resource exposes to the host

pub mod domain;
pub mod dto;
pub mod error;
pub mod schema;
pub mod state;

pub use error::StateError;
pub use schema::{Attribute, AttributeType, Presence, Schema};
pub use state::{Attributes, ResourceData};
