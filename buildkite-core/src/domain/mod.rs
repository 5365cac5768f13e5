//! Core domain types
//!
//! This module contains the Buildkite entities as they are returned by the
//! REST API. They are decoded leniently: `null` and missing fields collapse
//! to zero values so that the mapping layer never has to deal with `Option`.

pub mod pipeline;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Parse an API timestamp such as `2018-04-11T09:12:45.000Z`
///
/// Returns `None` for an empty or malformed value.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

/// Deserialize a field, treating an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn is_zero(value: &u32) -> bool {
    *value == 0
}
