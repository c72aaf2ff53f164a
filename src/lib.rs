// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod dedup;
pub mod extract;
pub mod filter;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod pricing;
pub mod rank;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::config::{ArtistTarget, Category, IntelConfig};
pub use crate::ingest::types::{FeedSource, RawEntry, Topic};
pub use crate::model::{ArtistReport, IntelReport, TourEvent};
pub use crate::pipeline::Pipeline;
