//! # Event Deduplicator
//!
//! Collapses every admissible entry mentioning a given (artist, city) pair
//! into a single `TourEvent`: modal date (earliest on a tie), union of
//! source links, and a confidence score counting independent contributors.
//! Also collapses near-duplicate headlines for the comeback-news list.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::model::{ExtractedFacts, FilteredEntry, TourEvent};

#[derive(Default)]
struct CityAccum {
    date_votes: BTreeMap<NaiveDate, u32>,
    source_links: BTreeSet<String>,
    contributors: u32,
}

/// At most one `TourEvent` per (artist, city) comes out of this, whatever
/// goes in. Output is sorted by city code.
pub fn merge_events(artist: &str, entries: &[(FilteredEntry, ExtractedFacts)]) -> Vec<TourEvent> {
    let mut by_city: BTreeMap<String, CityAccum> = BTreeMap::new();

    for (entry, facts) in entries {
        for city in &facts.cities {
            let acc = by_city.entry(city.clone()).or_default();
            acc.contributors += 1;
            acc.source_links.insert(entry.link.clone());
            for date in &facts.dates {
                *acc.date_votes.entry(*date).or_insert(0) += 1;
            }
        }
    }

    by_city
        .into_iter()
        .map(|(city, acc)| TourEvent {
            artist: artist.to_string(),
            city,
            date: modal_date(&acc.date_votes),
            source_links: acc.source_links,
            confidence: acc.contributors,
        })
        .collect()
}

/// Most frequently claimed date; ties go to the earliest. The BTreeMap
/// iterates in date order, so "strictly more votes" picks the earliest
/// among equals.
fn modal_date(votes: &BTreeMap<NaiveDate, u32>) -> Option<NaiveDate> {
    let mut best: Option<(NaiveDate, u32)> = None;
    for (&date, &count) in votes {
        match best {
            Some((_, n)) if count <= n => {}
            _ => best = Some((date, count)),
        }
    }
    best.map(|(d, _)| d)
}

/// Threshold for treating two headlines as the same story.
const HEADLINE_SIMILARITY: f64 = 0.90;

/// Drop entries whose headline is a near-duplicate of an earlier one, so
/// the comeback list does not repeat the same story from syndicating
/// outlets. First occurrence wins.
pub fn dedup_headlines(entries: Vec<FilteredEntry>) -> Vec<FilteredEntry> {
    let mut kept: Vec<FilteredEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let title = entry.title.to_lowercase();
        let duplicate = kept.iter().any(|k| {
            strsim::normalized_levenshtein(&k.title.to_lowercase(), &title)
                >= HEADLINE_SIMILARITY
        });
        if !duplicate {
            kept.push(entry);
        }
    }
    kept
}
