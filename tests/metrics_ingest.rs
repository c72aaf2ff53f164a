// tests/metrics_ingest.rs
use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use kpop_intel::config::IntelConfig;
use kpop_intel::ingest::types::{FeedSource, RawEntry, Topic};
use kpop_intel::pipeline::Pipeline;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

/// A source whose every fetch fails, as if the network were down.
struct DeadSource;

#[async_trait]
impl FeedSource for DeadSource {
    async fn fetch(&self, _artist: &str, _topic: Topic) -> Result<Vec<RawEntry>> {
        anyhow::bail!("connection refused")
    }

    fn name(&self) -> &'static str {
        "Dead"
    }
}

/// Each failed (artist, topic) fetch must land in `feed_errors_total`
/// exactly once. The pipeline owns the count; the provider only returns
/// the error.
#[test]
fn failed_fetch_counts_one_feed_error_per_query() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let mut cfg = IntelConfig::seed();
        cfg.roster.truncate(1);
        let pipeline = Pipeline::new(cfg, Box::new(DeadSource)).unwrap();

        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap();
        let report = rt.block_on(pipeline.run(now));

        // the failing source degrades the run, it does not abort it
        assert_eq!(report.artists.len(), 1);
        assert!(report.artists[0].tour_stops.is_empty());
    });

    let errors: u64 = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter(|(key, _, _, _)| key.key().name() == "feed_errors_total")
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(n) => n,
            _ => 0,
        })
        .sum();

    // one artist, two topics (Tour and Comeback), one increment each
    assert_eq!(errors, 2);
}
