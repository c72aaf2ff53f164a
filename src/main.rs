//! K-pop Intelligence binary entrypoint.
//! Loads the fixed tables, runs one batch scan over the roster, and writes
//! the three report artifacts into the working directory.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kpop_intel::config::IntelConfig;
use kpop_intel::ingest::providers::google_news::GoogleNewsSource;
use kpop_intel::pipeline::Pipeline;
use kpop_intel::report;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op elsewhere.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Configuration problems are the only fatal class of error; everything
    // past this point recovers per artist or per entry.
    let cfg = IntelConfig::load_default().context("loading configuration")?;
    let source = GoogleNewsSource::from_http(cfg.fetch_timeout_secs)?;
    let pipeline = Pipeline::new(cfg, Box::new(source))?;

    info!(
        artists = pipeline.config().roster.len(),
        reference = %pipeline.config().reference.name,
        "starting scan"
    );

    let intel = pipeline.run(Utc::now()).await;
    report::render_all(&intel, Path::new("."))?;

    info!(artists = intel.artists.len(), "scan complete");
    Ok(())
}
