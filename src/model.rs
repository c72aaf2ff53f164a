//! Domain model flowing through the pipeline stages. Everything here is
//! serde-serializable so the report renderers stay pure consumers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::ArtistTarget;
use crate::ingest::types::{RawEntry, Topic};

/// A raw entry after the trust filter has classified it. Only entries with
/// both flags set continue downstream.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredEntry {
    pub artist: String,
    pub topic: Topic,
    pub publisher: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published_at: Option<DateTime<Utc>>,
    pub trusted: bool,
    pub has_confirmation_signal: bool,
}

impl FilteredEntry {
    pub fn from_raw(raw: RawEntry, trusted: bool, has_confirmation_signal: bool) -> Self {
        Self {
            artist: raw.artist,
            topic: raw.topic,
            publisher: raw.publisher,
            title: raw.title,
            link: raw.link,
            summary: raw.summary,
            published_at: raw.published_at,
            trusted,
            has_confirmation_signal,
        }
    }

    /// Both checks are independent; failing either drops the entry.
    pub fn is_admissible(&self) -> bool {
        self.trusted && self.has_confirmation_signal
    }

    /// Title + summary, the text the extractor and vocabulary check run on.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }
}

/// Structured facts pulled out of one entry's free text. Zero cities or
/// zero dates is a valid result, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFacts {
    /// Canonical gazetteer codes only; unrecognized mentions are dropped.
    pub cities: BTreeSet<String>,
    /// Chronological, deduplicated.
    pub dates: Vec<NaiveDate>,
}

/// One deduplicated (artist, city) fact with merged provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourEvent {
    pub artist: String,
    pub city: String,
    pub date: Option<NaiveDate>,
    pub source_links: BTreeSet<String>,
    /// Count of independent contributing entries.
    pub confidence: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedStop {
    #[serde(flatten)]
    pub event: TourEvent,
    pub city_name: String,
    pub distance_km: f64,
    /// 1-based, ascending distance.
    pub rank: u32,
    pub best_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub vendor: String,
    pub price_cents: u32,
}

impl PriceQuote {
    pub fn display_price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PricedStop {
    #[serde(flatten)]
    pub stop: RankedStop,
    /// One quote per configured vendor, vendor-list order.
    pub quotes: Vec<PriceQuote>,
    pub min_price_cents: u32,
}

/// Per-artist unit handed to the report assembler.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistReport {
    pub target: ArtistTarget,
    pub comeback_news: Vec<FilteredEntry>,
    pub tour_stops: Vec<PricedStop>,
}

/// Full run output, artists in roster order.
#[derive(Debug, Clone, Serialize)]
pub struct IntelReport {
    pub generated_at: DateTime<Utc>,
    pub reference: String,
    pub artists: Vec<ArtistReport>,
}
