// tests/pipeline_e2e.rs
use anyhow::Result;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use kpop_intel::config::IntelConfig;
use kpop_intel::ingest::types::{FeedSource, RawEntry, Topic};
use kpop_intel::pipeline::Pipeline;

struct MockSource;

fn raw(
    artist: &str,
    topic: Topic,
    publisher: &str,
    title: &str,
    link: &str,
    published: Option<(i32, u32, u32)>,
) -> RawEntry {
    RawEntry {
        artist: artist.into(),
        topic,
        publisher: publisher.into(),
        title: title.into(),
        link: link.into(),
        summary: String::new(),
        published_at: published
            .map(|(y, m, d)| Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
    }
}

#[async_trait]
impl FeedSource for MockSource {
    async fn fetch(&self, artist: &str, topic: Topic) -> Result<Vec<RawEntry>> {
        if artist != "BTS" {
            // simulate an unresponsive source for the second roster artist
            anyhow::bail!("connection reset");
        }
        Ok(match topic {
            Topic::Tour => vec![
                raw(
                    artist,
                    topic,
                    "Soompi",
                    "BTS confirmed comeback schedule for NYC and LA, tour dates Jan 10 and Jan 15",
                    "https://soompi.test/1",
                    Some((2026, 8, 1)),
                ),
                raw(
                    artist,
                    topic,
                    "Billboard",
                    "BTS announces NYC and LA stops, tickets on sale",
                    "https://billboard.test/2",
                    Some((2026, 8, 2)),
                ),
                raw(
                    artist,
                    topic,
                    "RandomBlog",
                    "BTS confirmed comeback schedule for NYC and LA",
                    "https://randomblog.test/3",
                    Some((2026, 8, 3)),
                ),
            ],
            Topic::Comeback => vec![
                raw(
                    artist,
                    topic,
                    "Soompi",
                    "BTS unveils comeback album release date",
                    "https://soompi.test/4",
                    Some((2026, 7, 15)),
                ),
                // too old for the 6-month window
                raw(
                    artist,
                    topic,
                    "Soompi",
                    "BTS comeback schedule from last era",
                    "https://soompi.test/5",
                    Some((2025, 9, 1)),
                ),
                // undated entries cannot be bounded
                raw(
                    artist,
                    topic,
                    "Soompi",
                    "BTS comeback rumors resurface again",
                    "https://soompi.test/6",
                    None,
                ),
            ],
        })
    }

    fn name(&self) -> &'static str {
        "Mock"
    }
}

fn test_config() -> IntelConfig {
    let mut cfg = IntelConfig::seed();
    cfg.roster.retain(|t| t.name == "BTS" || t.name == "TWICE");
    cfg
}

#[tokio::test]
async fn full_run_produces_ranked_priced_stops_and_comeback_news() {
    let pipeline = Pipeline::new(test_config(), Box::new(MockSource)).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap();
    let report = pipeline.run(now).await;

    // roster order is preserved, failed artist still reports (empty)
    assert_eq!(report.artists.len(), 2);
    assert_eq!(report.artists[0].target.name, "BTS");
    assert_eq!(report.artists[1].target.name, "TWICE");
    assert!(report.artists[1].tour_stops.is_empty());
    assert!(report.artists[1].comeback_news.is_empty());

    let bts = &report.artists[0];

    // two trusted sources, two cities, one event per city
    assert_eq!(bts.tour_stops.len(), 2);
    let la = &bts.tour_stops[0];
    let nyc = &bts.tour_stops[1];
    assert_eq!(la.stop.event.city, "LA");
    assert_eq!(nyc.stop.event.city, "NYC");

    // LA is nearer Seattle: rank 1 and best value
    assert_eq!(la.stop.rank, 1);
    assert!(la.stop.best_value);
    assert!(!nyc.stop.best_value);
    assert!(la.stop.distance_km < nyc.stop.distance_km);

    // the RandomBlog entry contributed nothing
    assert_eq!(la.stop.event.confidence, 2);
    assert_eq!(nyc.stop.event.confidence, 2);
    assert!(nyc
        .stop
        .event
        .source_links
        .iter()
        .all(|l| !l.contains("randomblog")));

    // modal date tie resolves to the earliest, resolved forward of the run date
    assert_eq!(
        la.stop.event.date,
        chrono::NaiveDate::from_ymd_opt(2027, 1, 10)
    );

    // one quote per vendor, headline price is the minimum
    assert_eq!(la.quotes.len(), 4);
    assert_eq!(
        la.min_price_cents,
        la.quotes.iter().map(|q| q.price_cents).min().unwrap()
    );

    // comeback news: recent dated entry only
    assert_eq!(bts.comeback_news.len(), 1);
    assert_eq!(bts.comeback_news[0].link, "https://soompi.test/4");
}

#[tokio::test]
async fn repeated_runs_are_byte_identical() {
    let pipeline = Pipeline::new(test_config(), Box::new(MockSource)).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap();
    let a = serde_json::to_string(&pipeline.run(now).await).unwrap();
    let b = serde_json::to_string(&pipeline.run(now).await).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn empty_roster_result_is_not_fatal() {
    struct EmptySource;
    #[async_trait]
    impl FeedSource for EmptySource {
        async fn fetch(&self, _artist: &str, _topic: Topic) -> Result<Vec<RawEntry>> {
            Ok(Vec::new())
        }
        fn name(&self) -> &'static str {
            "Empty"
        }
    }

    let pipeline = Pipeline::new(test_config(), Box::new(EmptySource)).unwrap();
    let report = pipeline
        .run(Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap())
        .await;
    assert_eq!(report.artists.len(), 2);
    assert!(report
        .artists
        .iter()
        .all(|a| a.tour_stops.is_empty() && a.comeback_news.is_empty()));
}
