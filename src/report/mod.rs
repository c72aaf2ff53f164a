//! Report assembly: pure renderers over the pipeline's `IntelReport`.
//! Nothing here re-derives or re-filters facts; the model is rendered as-is
//! into the three parallel artifacts.

pub mod html;
pub mod json;
pub mod markdown;

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::model::IntelReport;

pub const JSON_FILE: &str = "kpop_intelligence.json";
pub const MARKDOWN_FILE: &str = "summary.md";
pub const HTML_FILE: &str = "report.html";

/// Write all three artifacts into `out_dir`.
pub fn render_all(report: &IntelReport, out_dir: &Path) -> Result<()> {
    json::write_json(report, &out_dir.join(JSON_FILE))?;
    markdown::write_summary(report, &out_dir.join(MARKDOWN_FILE))?;
    html::write_dashboard(report, &out_dir.join(HTML_FILE))?;
    info!(dir = %out_dir.display(), "reports written");
    Ok(())
}
