//! # Crawl Service
//!
//! Wires the domain parsers to the `NodeProbe` port and drives the
//! round-barrier traversal.

mod crawler;

pub use crawler::{ClassifyOutcome, CrawlOutcome, Crawler, RoundSummary, ScanOutcome};
