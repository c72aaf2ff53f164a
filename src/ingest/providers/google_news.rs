//! Google News RSS search adapter. One request per (artist, topic) pair.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;

use crate::ingest::types::{FeedSource, RawEntry, Topic};

const SEARCH_URL: &str = "https://news.google.com/rss/search";

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}
#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}
#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    source: Option<Source>,
}
/// `<source url="...">Soompi</source>`
#[derive(Debug, Deserialize)]
struct Source {
    #[serde(rename = "$text")]
    name: Option<String>,
}

fn parse_rfc2822_to_utc(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub struct GoogleNewsSource {
    mode: Mode,
}

enum Mode {
    Fixture(String),
    Http { client: reqwest::Client },
}

impl GoogleNewsSource {
    /// Parse from a canned RSS body instead of the network. Used in tests.
    pub fn from_fixture_str(s: &str) -> Self {
        Self {
            mode: Mode::Fixture(s.to_string()),
        }
    }

    /// Live HTTP mode with a bounded per-request timeout so one stalled
    /// fetch cannot hold up the whole roster.
    pub fn from_http(timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("building http client")?;
        Ok(Self {
            mode: Mode::Http { client },
        })
    }

    fn search_url(artist: &str, topic: Topic) -> String {
        let query = format!("{} {}", artist, topic.query_term());
        format!(
            "{SEARCH_URL}?q={}&hl=en-US&gl=US&ceid=US:en",
            urlencoding::encode(&query)
        )
    }

    fn parse_items(artist: &str, topic: Topic, body: &str) -> Result<Vec<RawEntry>> {
        let t0 = std::time::Instant::now();
        let xml_clean = scrub_html_entities_for_xml(body);
        let rss: Rss = from_str(&xml_clean).context("parsing google news rss xml")?;

        let mut out = Vec::with_capacity(rss.channel.item.len());
        for it in rss.channel.item {
            let title = crate::ingest::normalize_text(it.title.as_deref().unwrap_or_default());
            let link = it.link.unwrap_or_default();
            if title.is_empty() || link.is_empty() {
                continue;
            }
            let publisher = it
                .source
                .and_then(|s| s.name)
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unknown".to_string());

            out.push(RawEntry {
                artist: artist.to_string(),
                topic,
                publisher,
                title,
                link,
                summary: crate::ingest::normalize_text(
                    it.description.as_deref().unwrap_or_default(),
                ),
                published_at: it.pub_date.as_deref().and_then(parse_rfc2822_to_utc),
            });
        }

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("feed_parse_ms").record(ms);
        counter!("feed_entries_total").increment(out.len() as u64);
        Ok(out)
    }
}

#[async_trait]
impl FeedSource for GoogleNewsSource {
    async fn fetch(&self, artist: &str, topic: Topic) -> Result<Vec<RawEntry>> {
        match &self.mode {
            Mode::Fixture(s) => Self::parse_items(artist, topic, s),

            Mode::Http { client } => {
                let url = Self::search_url(artist, topic);
                // recovery policy (and the feed_errors_total count) lives
                // in the pipeline; this just reports the failure upward
                let body = match client.get(&url).send().await {
                    Ok(resp) => resp.text().await.context("google news .text()")?,
                    Err(e) => {
                        tracing::warn!(error = ?e, artist, "feed http error");
                        return Err(e).context("google news get()");
                    }
                };
                Self::parse_items(artist, topic, &body)
            }
        }
    }

    fn name(&self) -> &'static str {
        "GoogleNews"
    }
}

fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
