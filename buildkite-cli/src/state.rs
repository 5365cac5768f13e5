//! State file handling
//!
//! The state file holds one `ResourceData` record as pretty-printed JSON:
//! `{"id": "...", "attributes": {...}}`.

use std::path::Path;

use anyhow::{Context, Result};
use buildkite_core::ResourceData;

/// Load a record from the state file
pub fn load(path: &Path) -> Result<ResourceData> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse state file: {}", path.display()))
}

/// Write a record back to the state file
pub fn save(path: &Path, data: &ResourceData) -> Result<()> {
    let mut content = serde_json::to_string_pretty(data).context("Failed to encode state")?;
    content.push('\n');

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write state file: {}", path.display()))
}
