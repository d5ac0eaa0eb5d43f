//! # rpc-finder Test Suite
//!
//! End-to-end scans through the real reqwest probe against local
//! `wiremock` servers standing in for Tendermint RPC nodes.
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── nodes.rs       # Mock node network builder
//!     └── e2e_scan.rs    # Crawl, classify, report, export
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rpc-finder-tests
//! ```

pub mod integration;
