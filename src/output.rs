//! JSON output
//!
//! Writes the primary resource types as a pretty-printed JSON array
//! (2-space indent, UTF-8, non-ASCII left unescaped).

use anyhow::{Context, Result};
use std::path::Path;

/// Default output file, written to the working directory
pub const OUTPUT_FILE: &str = "PRIMARY_RESOURCE_TYPES.json";

/// Render the list exactly as it is written to disk
pub fn render_json(resource_types: &[String]) -> Result<String> {
    serde_json::to_string_pretty(resource_types).context("Failed to serialize resource types")
}

/// Write the list to `path`, replacing any existing file
pub fn save_to_json(resource_types: &[String], path: &Path) -> Result<()> {
    let content = render_json(resource_types)?;
    std::fs::write(path, content)?;

    tracing::info!("Wrote {} resource types to {:?}", resource_types.len(), path);
    Ok(())
}
