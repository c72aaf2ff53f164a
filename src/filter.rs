//! # Trust Filter
//!
//! Classifies raw feed entries against the publisher whitelist and the
//! confirmation vocabulary. Both checks are independent; an entry failing
//! either is expected noise and is dropped silently downstream, never
//! reported as an error. Also hosts the comeback-news recency window.

use chrono::{DateTime, Months, Utc};

use crate::config::IntelConfig;
use crate::ingest::types::RawEntry;
use crate::model::FilteredEntry;

pub struct TrustFilter {
    whitelist: Vec<String>,
    vocabulary: Vec<String>,
}

impl TrustFilter {
    pub fn new(cfg: &IntelConfig) -> Self {
        Self {
            whitelist: cfg.whitelist.iter().map(|w| normalize(w)).collect(),
            vocabulary: cfg.vocabulary.iter().map(|v| v.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, raw: RawEntry) -> FilteredEntry {
        let trusted = self.is_trusted_publisher(&raw.publisher);
        let text = format!("{} {}", raw.title, raw.summary).to_lowercase();
        let has_signal = self.vocabulary.iter().any(|kw| text.contains(kw.as_str()));
        FilteredEntry::from_raw(raw, trusted, has_signal)
    }

    /// Case-insensitive and substring-tolerant: "The Korea Herald" matches
    /// the "Korea Herald" whitelist entry, and "Soompi" matches a feed that
    /// reports it as "soompi.com".
    pub fn is_trusted_publisher(&self, publisher: &str) -> bool {
        let p = normalize(publisher);
        if p.is_empty() {
            return false;
        }
        self.whitelist
            .iter()
            .any(|w| p.contains(w.as_str()) || w.contains(p.as_str()))
    }
}

/// Lowercase and drop everything that is not alphanumeric, so punctuation,
/// spacing, and domain dots never break a match.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// An entry qualifies as comeback news iff it was published within the
/// trailing window ending at `now`. Undated entries cannot be bounded and
/// are excluded.
pub fn within_window(
    published_at: Option<DateTime<Utc>>,
    window_months: u32,
    now: DateTime<Utc>,
) -> bool {
    let Some(ts) = published_at else {
        return false;
    };
    let Some(floor) = now.checked_sub_months(Months::new(window_months)) else {
        return false;
    };
    ts > floor && ts <= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntelConfig;
    use crate::ingest::types::Topic;
    use chrono::TimeZone;

    fn raw(publisher: &str, title: &str, summary: &str) -> RawEntry {
        RawEntry {
            artist: "BTS".into(),
            topic: Topic::Tour,
            publisher: publisher.into(),
            title: title.into(),
            link: "https://example.test/a".into(),
            summary: summary.into(),
            published_at: None,
        }
    }

    fn filter() -> TrustFilter {
        TrustFilter::new(&IntelConfig::seed())
    }

    #[test]
    fn whitelisted_publisher_with_signal_passes() {
        let f = filter().classify(raw("Soompi", "BTS confirmed comeback schedule", ""));
        assert!(f.trusted);
        assert!(f.has_confirmation_signal);
        assert!(f.is_admissible());
    }

    #[test]
    fn random_blog_is_untrusted_regardless_of_keywords() {
        let f = filter().classify(raw("RandomBlog", "BTS confirmed comeback schedule", ""));
        assert!(!f.trusted);
        assert!(f.has_confirmation_signal);
        assert!(!f.is_admissible());
    }

    #[test]
    fn trusted_without_signal_is_not_admissible() {
        let f = filter().classify(raw("Billboard", "BTS spotted at the airport", ""));
        assert!(f.trusted);
        assert!(!f.has_confirmation_signal);
        assert!(!f.is_admissible());
    }

    #[test]
    fn publisher_match_is_substring_tolerant() {
        let t = filter();
        assert!(t.is_trusted_publisher("The Korea Herald"));
        assert!(t.is_trusted_publisher("soompi.com"));
        assert!(t.is_trusted_publisher("ROLLING STONE"));
        assert!(!t.is_trusted_publisher("Some Fan Cafe"));
        assert!(!t.is_trusted_publisher(""));
    }

    #[test]
    fn window_bounds_and_undated_exclusion() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap();
        let inside = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
        let outside = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap();
        assert!(within_window(Some(inside), 6, now));
        assert!(!within_window(Some(outside), 6, now));
        assert!(!within_window(Some(future), 6, now));
        assert!(!within_window(None, 6, now));
    }
}
