// src/ingest/mod.rs
pub mod providers;
pub mod types;

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration. Counters are no-ops unless a recorder is
/// installed, so this costs nothing in plain CLI runs.
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("feed_entries_total", "Entries parsed from feed sources.");
        describe_counter!(
            "entries_admitted_total",
            "Entries passing the trust filter."
        );
        describe_counter!(
            "entries_rejected_total",
            "Entries dropped by whitelist or vocabulary check."
        );
        describe_counter!("feed_errors_total", "Feed fetch/parse failures.");
        describe_counter!("tour_events_total", "Deduplicated tour events produced.");
        describe_histogram!("feed_parse_ms", "Feed parse time in milliseconds.");
    });
}

/// Normalize feed text: decode HTML entities, strip tags, fold whitespace.
/// Google News summaries arrive as HTML fragments.
pub fn normalize_text(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    let stripped = re_tags.replace_all(&decoded, " ");

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
