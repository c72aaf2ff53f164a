// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The fixed keyword queries issued per artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Topic {
    Tour,
    Comeback,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Tour, Topic::Comeback];

    /// Keyword appended to the artist name in the search query.
    pub fn query_term(self) -> &'static str {
        match self {
            Topic::Tour => "US Tour",
            Topic::Comeback => "Comeback",
        }
    }
}

/// One feed entry as returned by a source, before any filtering.
#[derive(Debug, Clone, Serialize)]
pub struct RawEntry {
    pub artist: String,
    pub topic: Topic,
    pub publisher: String, // e.g. "Soompi", "Billboard"
    pub title: String,
    pub link: String,
    pub summary: String,
    /// Unknown publish time is tolerated as None, never fatal.
    pub published_at: Option<DateTime<Utc>>,
}

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// One request per (artist, topic) pair. A transient failure should be
    /// surfaced as Err; the pipeline logs it and continues with no entries.
    async fn fetch(&self, artist: &str, topic: Topic) -> Result<Vec<RawEntry>>;
    fn name(&self) -> &'static str;
}
