//! Structured-data artifact: the full report model, pretty-printed.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::model::IntelReport;

pub fn write_json(report: &IntelReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

/// Serialization used by the HTML dashboard's embedded payload.
pub fn to_json_string(report: &IntelReport) -> Result<String> {
    serde_json::to_string(report).context("serializing report")
}
