//! # Entity Extractor
//!
//! Pulls structured facts out of an entry's free text:
//!
//! - City mentions, matched against the gazetteer alias table with word
//!   boundaries so "LA" never matches inside another word. Short all-caps
//!   codes (LA, NY, DC…) match case-sensitively; full names are
//!   case-insensitive, longest alias first.
//! - Dates in month-name ("Jan 10", "January 10th, 2026"), US numeric
//!   ("1/10/2026"), and ISO ("2026-01-10") forms, each normalized to a
//!   valid calendar date or discarded. Yearless dates resolve to the next
//!   occurrence on or after the run date.
//!
//! Zero cities or zero dates is a valid result, not an error.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::HashMap;

use crate::config::City;
use crate::model::ExtractedFacts;

pub struct EntityExtractor {
    re_names: Option<Regex>,
    re_codes: Option<Regex>,
    name_to_code: HashMap<String, String>,
    code_to_code: HashMap<String, String>,
}

/// Short all-caps tokens are ambiguous ("la", "in") and only count when
/// written as the code itself.
fn is_short_code(alias: &str) -> bool {
    alias.len() <= 4 && !alias.is_empty() && alias.chars().all(|c| c.is_ascii_uppercase())
}

/// `\b` fails after a trailing "." (two non-word chars), so only close the
/// pattern with a boundary when the alias ends in a word character.
fn alias_pattern(alias: &str) -> String {
    let escaped = regex::escape(alias);
    let tail = if alias
        .chars()
        .last()
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        r"\b"
    } else {
        ""
    };
    format!(r"\b{escaped}{tail}")
}

impl EntityExtractor {
    pub fn new(gazetteer: &[City]) -> Result<Self> {
        let mut names: Vec<&str> = Vec::new();
        let mut codes: Vec<&str> = Vec::new();
        let mut name_to_code = HashMap::new();
        let mut code_to_code = HashMap::new();

        for city in gazetteer {
            for alias in &city.aliases {
                if is_short_code(alias) {
                    codes.push(alias);
                    code_to_code.insert(alias.clone(), city.code.clone());
                } else {
                    names.push(alias);
                    name_to_code.insert(alias.to_lowercase(), city.code.clone());
                }
            }
        }

        // Longest alias first so "New York City" beats "New York".
        names.sort_by_key(|a| std::cmp::Reverse(a.len()));
        codes.sort_by_key(|a| std::cmp::Reverse(a.len()));

        let build = |aliases: &[&str], case_insensitive: bool| -> Result<Option<Regex>> {
            if aliases.is_empty() {
                return Ok(None);
            }
            let alternation = aliases
                .iter()
                .map(|a| alias_pattern(a))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = if case_insensitive {
                format!("(?i)(?:{alternation})")
            } else {
                format!("(?:{alternation})")
            };
            Regex::new(&pattern)
                .map(Some)
                .context("compiling gazetteer pattern")
        };

        Ok(Self {
            re_names: build(&names, true)?,
            re_codes: build(&codes, false)?,
            name_to_code,
            code_to_code,
        })
    }

    pub fn extract(&self, text: &str, today: NaiveDate) -> ExtractedFacts {
        let mut facts = ExtractedFacts::default();

        if let Some(re) = &self.re_names {
            for m in re.find_iter(text) {
                if let Some(code) = self.name_to_code.get(&m.as_str().to_lowercase()) {
                    facts.cities.insert(code.clone());
                }
            }
        }
        if let Some(re) = &self.re_codes {
            for m in re.find_iter(text) {
                if let Some(code) = self.code_to_code.get(m.as_str()) {
                    facts.cities.insert(code.clone());
                }
            }
        }

        facts.dates = extract_dates(text, today);
        facts
    }
}

static RE_MONTH_NAME: OnceCell<Regex> = OnceCell::new();
static RE_ISO: OnceCell<Regex> = OnceCell::new();
static RE_NUMERIC: OnceCell<Regex> = OnceCell::new();

/// All recognized date forms in `text`, normalized, deduplicated, and
/// sorted chronologically. Unparsable candidates are dropped, not defaulted.
pub fn extract_dates(text: &str, today: NaiveDate) -> Vec<NaiveDate> {
    let re_month = RE_MONTH_NAME.get_or_init(|| {
        Regex::new(
            r"(?i)\b(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?\b",
        )
        .unwrap()
    });
    let re_iso = RE_ISO.get_or_init(|| Regex::new(r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b").unwrap());
    let re_numeric = RE_NUMERIC
        .get_or_init(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})(?:[/-](\d{2,4}))?\b").unwrap());

    let mut dates: Vec<NaiveDate> = Vec::new();

    for cap in re_month.captures_iter(text) {
        let month = month_number(&cap[1]);
        let day: u32 = match cap[2].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        let parsed = match cap.get(3) {
            Some(y) => y
                .as_str()
                .parse::<i32>()
                .ok()
                .and_then(|y| NaiveDate::from_ymd_opt(y, month, day)),
            None => resolve_forward(month, day, today),
        };
        if let Some(d) = parsed {
            dates.push(d);
        }
    }

    // Mask ISO matches before the US-numeric pass; "2026-01-10" must not
    // additionally surface as a yearless "01-10".
    let mut masked = text.to_string();
    for cap in re_iso.captures_iter(text) {
        let (y, m, d) = (
            cap[1].parse::<i32>().ok(),
            cap[2].parse::<u32>().ok(),
            cap[3].parse::<u32>().ok(),
        );
        if let (Some(y), Some(m), Some(d)) = (y, m, d) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, d) {
                dates.push(date);
            }
        }
        let whole = cap.get(0).unwrap();
        masked.replace_range(whole.range(), &" ".repeat(whole.len()));
    }

    for cap in re_numeric.captures_iter(&masked) {
        let month: u32 = match cap[1].parse() {
            Ok(m) => m,
            Err(_) => continue,
        };
        let day: u32 = match cap[2].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        let parsed = match cap.get(3) {
            Some(y) => y
                .as_str()
                .parse::<i32>()
                .ok()
                .map(|y| if y < 100 { 2000 + y } else { y })
                .and_then(|y| NaiveDate::from_ymd_opt(y, month, day)),
            None => resolve_forward(month, day, today),
        };
        if let Some(d) = parsed {
            dates.push(d);
        }
    }

    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Yearless month/day: tour announcements point forward, so take the next
/// occurrence on or after `today`.
fn resolve_forward(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    match NaiveDate::from_ymd_opt(today.year(), month, day) {
        Some(d) if d >= today => Some(d),
        _ => NaiveDate::from_ymd_opt(today.year() + 1, month, day),
    }
}

fn month_number(token: &str) -> u32 {
    match token.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        _ => 12,
    }
}
