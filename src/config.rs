//! # Pipeline Configuration
//!
//! Fixed lookup tables and tuning parameters for the intelligence pipeline:
//! artist roster, publisher whitelist, confirmation vocabulary, city
//! gazetteer, ticket-vendor list, proximity reference point, top-N cap,
//! recency window, and fetch timeout.
//!
//! - Loads from TOML (`$KPOP_INTEL_CONFIG`, then `config/intel.toml`).
//! - Any field absent from the file falls back to the built-in seed.
//! - Tables are read-only after startup; `validate()` refuses to run with
//!   empty or malformed tables.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "KPOP_INTEL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config/intel.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Boy Group")]
    BoyGroup,
    #[serde(rename = "Girl Group")]
    GirlGroup,
    #[serde(rename = "Soloist")]
    Soloist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistTarget {
    pub name: String,
    pub category: Category,
}

/// One gazetteer row: canonical code, display name, coordinate, and the
/// surface forms that count as a mention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub aliases: Vec<String>,
}

/// Reference coordinate for proximity ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefPoint {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntelConfig {
    #[serde(default = "default_roster")]
    pub roster: Vec<ArtistTarget>,
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<String>,
    #[serde(default = "default_vocabulary")]
    pub vocabulary: Vec<String>,
    #[serde(default = "default_gazetteer")]
    pub gazetteer: Vec<City>,
    #[serde(default = "default_vendors")]
    pub vendors: Vec<String>,
    #[serde(default = "default_reference")]
    pub reference: RefPoint,
    #[serde(default = "default_max_stops")]
    pub max_stops: usize,
    #[serde(default = "default_window_months")]
    pub recency_window_months: u32,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self::seed()
    }
}

impl IntelConfig {
    /// Built-in seed covering the common US tour circuit and the outlets
    /// that reliably confirm schedules.
    pub fn seed() -> Self {
        Self {
            roster: default_roster(),
            whitelist: default_whitelist(),
            vocabulary: default_vocabulary(),
            gazetteer: default_gazetteer(),
            vendors: default_vendors(),
            reference: default_reference(),
            max_stops: default_max_stops(),
            recency_window_months: default_window_months(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }

    /// Load from an explicit TOML file. Fields missing from the file take
    /// their seed defaults; a file that does not parse is a hard error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: IntelConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config from {}", path.display()))?;
        Ok(cfg)
    }

    /// Resolution order: `$KPOP_INTEL_CONFIG`, then `config/intel.toml`,
    /// then the built-in seed.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                bail!("{ENV_CONFIG_PATH} points to non-existent path");
            }
            return Self::load_from(&pb);
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::seed())
    }

    /// Startup validation. The pipeline cannot produce meaningful output
    /// without its fixed tables, so an empty table refuses to run.
    pub fn validate(&self) -> Result<()> {
        if self.roster.is_empty() {
            bail!("config: artist roster is empty");
        }
        if self.whitelist.is_empty() {
            bail!("config: publisher whitelist is empty");
        }
        if self.vocabulary.is_empty() {
            bail!("config: confirmation vocabulary is empty");
        }
        if self.gazetteer.is_empty() {
            bail!("config: gazetteer is empty");
        }
        if self.vendors.is_empty() {
            bail!("config: vendor list is empty");
        }
        if self.max_stops == 0 {
            bail!("config: max_stops must be at least 1");
        }
        if !self.reference.lat.is_finite() || !self.reference.lon.is_finite() {
            bail!("config: reference coordinate is not finite");
        }
        for c in &self.gazetteer {
            if c.code.trim().is_empty() || c.aliases.is_empty() {
                bail!("config: gazetteer entry {:?} has no code or aliases", c.name);
            }
            if !c.lat.is_finite() || !c.lon.is_finite() {
                bail!("config: gazetteer entry {:?} has a bad coordinate", c.name);
            }
        }
        Ok(())
    }

    pub fn city(&self, code: &str) -> Option<&City> {
        self.gazetteer.iter().find(|c| c.code == code)
    }
}

fn default_roster() -> Vec<ArtistTarget> {
    use Category::*;
    [
        ("BTS", BoyGroup),
        ("ENHYPEN", BoyGroup),
        ("SEVENTEEN", BoyGroup),
        ("Stray Kids", BoyGroup),
        ("ATEEZ", BoyGroup),
        ("NCT DREAM", BoyGroup),
        ("BLACKPINK", GirlGroup),
        ("TWICE", GirlGroup),
        ("NewJeans", GirlGroup),
        ("aespa", GirlGroup),
        ("ITZY", GirlGroup),
        ("IVE", GirlGroup),
        ("LE SSERAFIM", GirlGroup),
        ("BABYMONSTER", GirlGroup),
        ("BIBI", Soloist),
    ]
    .into_iter()
    .map(|(name, category)| ArtistTarget {
        name: name.to_string(),
        category,
    })
    .collect()
}

fn default_whitelist() -> Vec<String> {
    [
        "Soompi",
        "Allkpop",
        "Billboard",
        "NME",
        "Koreaboo",
        "Rolling Stone",
        "Weverse",
        "Hypebeast",
        "Variety",
        "Korea Herald",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Stems, matched as lowercase substrings, so "announce" also covers
/// "announces"/"announced".
fn default_vocabulary() -> Vec<String> {
    [
        "confirm",
        "announce",
        "schedule",
        "ticket sale",
        "dates",
        "cities",
        "unveil",
        "drops",
        "release",
        "comeback",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_gazetteer() -> Vec<City> {
    fn city(code: &str, name: &str, lat: f64, lon: f64, aliases: &[&str]) -> City {
        City {
            code: code.to_string(),
            name: name.to_string(),
            lat,
            lon,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
    vec![
        city("SEA", "Seattle", 47.6062, -122.3321, &["Seattle"]),
        city("LA", "Los Angeles", 34.0522, -118.2437, &["Los Angeles", "LA"]),
        city(
            "NYC",
            "New York",
            40.7128,
            -74.0060,
            &["New York City", "New York", "NYC", "NY"],
        ),
        city("CHI", "Chicago", 41.8781, -87.6298, &["Chicago"]),
        city("HOU", "Houston", 29.7604, -95.3698, &["Houston"]),
        city("ATL", "Atlanta", 33.7490, -84.3880, &["Atlanta"]),
        city("DAL", "Dallas", 32.7767, -96.7970, &["Dallas"]),
        city(
            "SF",
            "San Francisco",
            37.7749,
            -122.4194,
            &["San Francisco", "SF"],
        ),
        city("OAK", "Oakland", 37.8044, -122.2712, &["Oakland"]),
        city("EWR", "Newark", 40.7357, -74.1724, &["Newark"]),
        city(
            "DC",
            "Washington D.C.",
            38.9072,
            -77.0369,
            &["Washington D.C.", "Washington DC", "DC"],
        ),
        city("LV", "Las Vegas", 36.1699, -115.1398, &["Las Vegas", "Vegas"]),
        city("ANA", "Anaheim", 33.8366, -117.9143, &["Anaheim"]),
        city("IGL", "Inglewood", 33.9617, -118.3531, &["Inglewood"]),
        city("ROS", "Rosemont", 41.9956, -87.8806, &["Rosemont"]),
        city("FTW", "Fort Worth", 32.7555, -97.3308, &["Fort Worth"]),
        city("BOS", "Boston", 42.3601, -71.0589, &["Boston"]),
        city("MIA", "Miami", 25.7617, -80.1918, &["Miami"]),
    ]
}

fn default_vendors() -> Vec<String> {
    ["Ticketmaster", "StubHub", "SeatGeek", "Vivid Seats"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn default_reference() -> RefPoint {
    RefPoint {
        name: "Seattle".to_string(),
        lat: 47.6062,
        lon: -122.3321,
    }
}

fn default_max_stops() -> usize {
    4
}

fn default_window_months() -> u32 {
    6
}

fn default_fetch_timeout() -> u64 {
    10
}
