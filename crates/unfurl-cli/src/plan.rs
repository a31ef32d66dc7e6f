//! Build plan file exchange.
//!
//! The two steps run as separate processes; the merged plan travels between
//! them as a JSON file owned by the surrounding pipeline.

use anyhow::Context;
use anyhow::Result;
use std::fs;
use std::path::Path;
use unfurl_core::BuildPlan;

/// Reads the plan file, or returns an empty plan if the file does not exist.
pub fn read_or_default(path: &Path) -> Result<BuildPlan> {
    if !path.exists() {
        return Ok(BuildPlan::new());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read build plan {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse build plan {}", path.display()))
}

/// Writes the merged plan back to the plan file.
pub fn write(path: &Path, plan: &BuildPlan) -> Result<()> {
    let data = serde_json::to_string_pretty(plan).context("failed to serialize build plan")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write build plan {}", path.display()))
}
