//! # Pipeline Orchestration
//!
//! The single-pass batch run: for each roster artist, in order,
//! fetch → classify → extract → deduplicate → rank → price, then hand the
//! accumulated `IntelReport` to the report renderers. Per-entry and
//! per-artist failures are isolated; only configuration failures abort.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::{debug, info, warn};

use crate::config::{ArtistTarget, IntelConfig};
use crate::dedup::{dedup_headlines, merge_events};
use crate::extract::EntityExtractor;
use crate::filter::{within_window, TrustFilter};
use crate::ingest::types::{FeedSource, Topic};
use crate::model::{ArtistReport, ExtractedFacts, FilteredEntry, IntelReport};
use crate::{pricing, rank};

pub struct Pipeline {
    cfg: IntelConfig,
    filter: TrustFilter,
    extractor: EntityExtractor,
    source: Box<dyn FeedSource>,
}

impl Pipeline {
    /// Fails fast on configuration problems; everything after this point
    /// recovers locally.
    pub fn new(cfg: IntelConfig, source: Box<dyn FeedSource>) -> Result<Self> {
        cfg.validate().context("pipeline configuration")?;
        let filter = TrustFilter::new(&cfg);
        let extractor = EntityExtractor::new(&cfg.gazetteer)?;
        crate::ingest::ensure_metrics_described();
        Ok(Self {
            cfg,
            filter,
            extractor,
            source,
        })
    }

    pub fn config(&self) -> &IntelConfig {
        &self.cfg
    }

    /// Run the whole roster once. `now` is injected so runs are
    /// reproducible under test.
    pub async fn run(&self, now: DateTime<Utc>) -> IntelReport {
        let mut artists = Vec::with_capacity(self.cfg.roster.len());
        for target in &self.cfg.roster {
            artists.push(self.run_artist(target, now).await);
        }
        IntelReport {
            generated_at: now,
            reference: self.cfg.reference.name.clone(),
            artists,
        }
    }

    async fn run_artist(&self, target: &ArtistTarget, now: DateTime<Utc>) -> ArtistReport {
        let mut admitted: Vec<FilteredEntry> = Vec::new();
        let mut rejected = 0usize;

        for topic in Topic::ALL {
            let raw = match self.source.fetch(&target.name, topic).await {
                Ok(v) => v,
                Err(e) => {
                    // Source unavailable: zero entries for this pair, the
                    // rest of the roster still runs.
                    warn!(error = ?e, artist = %target.name, ?topic, "feed fetch failed");
                    counter!("feed_errors_total").increment(1);
                    Vec::new()
                }
            };

            for entry in raw {
                let classified = self.filter.classify(entry);
                if classified.is_admissible() {
                    admitted.push(classified);
                } else {
                    debug!(
                        artist = %target.name,
                        publisher = %classified.publisher,
                        trusted = classified.trusted,
                        signal = classified.has_confirmation_signal,
                        "entry rejected"
                    );
                    rejected += 1;
                }
            }
        }

        counter!("entries_admitted_total").increment(admitted.len() as u64);
        counter!("entries_rejected_total").increment(rejected as u64);

        let today = now.date_naive();
        let with_facts: Vec<(FilteredEntry, ExtractedFacts)> = admitted
            .iter()
            .map(|e| (e.clone(), self.extractor.extract(&e.full_text(), today)))
            .collect();

        let events = merge_events(&target.name, &with_facts);
        counter!("tour_events_total").increment(events.len() as u64);

        let ranked = rank::rank(
            events,
            &self.cfg.reference,
            self.cfg.max_stops,
            &self.cfg.gazetteer,
        );
        let tour_stops = ranked
            .into_iter()
            .map(|stop| pricing::quote(stop, &self.cfg.vendors))
            .collect::<Vec<_>>();

        let mut comeback_news: Vec<FilteredEntry> = admitted
            .into_iter()
            .filter(|e| e.topic == Topic::Comeback)
            .filter(|e| within_window(e.published_at, self.cfg.recency_window_months, now))
            .collect();
        comeback_news.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        let comeback_news = dedup_headlines(comeback_news);

        info!(
            artist = %target.name,
            stops = tour_stops.len(),
            comeback = comeback_news.len(),
            rejected,
            "artist scan complete"
        );

        ArtistReport {
            target: target.clone(),
            comeback_news,
            tour_stops,
        }
    }
}
