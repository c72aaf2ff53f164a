//! Tabular text artifact: one Markdown table of ranked tour stops and one
//! of recent comeback headlines.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::model::{IntelReport, PriceQuote};

pub fn write_summary(report: &IntelReport, path: &Path) -> Result<()> {
    fs::write(path, render(report)).with_context(|| format!("writing {}", path.display()))
}

pub fn render(report: &IntelReport) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# K-pop Intelligence Report");
    let _ = writeln!(
        md,
        "Generated: {} | distances from {}",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.reference
    );
    md.push('\n');

    let any_stops = report.artists.iter().any(|a| !a.tour_stops.is_empty());
    if !any_stops {
        let _ = writeln!(md, "_No confirmed tour stops found in this scan._");
    } else {
        let _ = writeln!(
            md,
            "| Artist | # | City | Date | Distance (km) | Confirmations | Tickets from |"
        );
        let _ = writeln!(md, "|---|---|---|---|---|---|---|");
        for artist in &report.artists {
            for stop in &artist.tour_stops {
                let date = stop
                    .stop
                    .event
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "TBA".to_string());
                let best = if stop.stop.best_value { " ⭐" } else { "" };
                let _ = writeln!(
                    md,
                    "| **{}** | {}{} | {} | {} | {:.0} | {} | {} |",
                    artist.target.name,
                    stop.stop.rank,
                    best,
                    stop.stop.city_name,
                    date,
                    stop.stop.distance_km,
                    stop.stop.event.confidence,
                    min_quote_display(&stop.quotes, stop.min_price_cents),
                );
            }
        }
    }

    md.push('\n');
    let _ = writeln!(md, "## Comeback news");
    md.push('\n');
    let any_news = report.artists.iter().any(|a| !a.comeback_news.is_empty());
    if !any_news {
        let _ = writeln!(md, "_No recent comeback news._");
    } else {
        let _ = writeln!(md, "| Artist | Source | Title |");
        let _ = writeln!(md, "|---|---|---|");
        for artist in &report.artists {
            for item in &artist.comeback_news {
                let _ = writeln!(
                    md,
                    "| **{}** | *{}* | [{}]({}) |",
                    artist.target.name, item.publisher, item.title, item.link
                );
            }
        }
    }

    md
}

fn min_quote_display(quotes: &[PriceQuote], min_cents: u32) -> String {
    quotes
        .iter()
        .find(|q| q.price_cents == min_cents)
        .map(|q| format!("{} ({})", q.display_price(), q.vendor))
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn empty_report_renders_placeholders() {
        let report = IntelReport {
            generated_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            reference: "Seattle".into(),
            artists: Vec::new(),
        };
        let md = render(&report);
        assert!(md.contains("# K-pop Intelligence Report"));
        assert!(md.contains("_No confirmed tour stops found in this scan._"));
        assert!(md.contains("_No recent comeback news._"));
    }

    #[test]
    fn header_separator_is_plain_ascii() {
        let report = IntelReport {
            generated_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            reference: "Seattle".into(),
            artists: Vec::new(),
        };
        let md = render(&report);
        assert!(md.contains("| distances from Seattle"));
        assert!(!md.lines().next().unwrap_or_default().contains('\u{2014}'));
        assert!(!md.contains("\u{2014} distances"));
    }
}
