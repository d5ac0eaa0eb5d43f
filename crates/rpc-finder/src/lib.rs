//! # RPC Finder
//!
//! Crawls the RPC peer graph of a Tendermint-style network and flags
//! validators whose voting power is visible through an unauthenticated
//! `/status` endpoint.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Endpoints, peer extraction, status classification, reports
//! - **Ports Layer:** `NodeProbe` (network boundary) and `TimeSource`
//! - **Service Layer:** `Crawler`, the round-barrier breadth-first traversal
//! - **Adapters Layer:** reqwest probe, YAML config, seed files, CSV and table output
//!
//! ```text
//!  seeds ──→ Crawler::discover ──(/net_info, every round)──→ visited set
//!                                                                │
//!  records ←── Crawler::classify ←──(/status, once per node)─────┘
//!     │
//!     └──→ Report::build ──→ table + valid_rpc.csv + vulnerable_validators.csv
//! ```
//!
//! ## Example
//!
//! ```rust
//! use rpc_finder::{extract_peers, Endpoint};
//!
//! let body = r#"{"jsonrpc":"2.0","result":{"peers":[
//!     {"remote_ip":"5.6.7.8","node_info":{"other":{"rpc_address":"tcp://0.0.0.0:26657"}}}
//! ]}}"#;
//!
//! let peers = extract_peers(body, 26657);
//! assert!(peers.contains(&Endpoint::from_ip_port("5.6.7.8", 26657)));
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Test utilities (MockProbe, FixedTimeSource).
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Domain
pub use domain::{
    classify, extract_genesis_ips, extract_peers, genesis_endpoints, is_public_ipv4,
    Classification, Endpoint, EndpointError, RecordRow, Report, Unavailable, ValidatorRecord,
    COLUMNS, DEFAULT_NETWORK_ID, DEFAULT_RPC_PORT, NOT_DETERMINED,
};

// Ports
pub use ports::{NodeProbe, ProbeError, ProbeResult, TimeSource, NET_INFO_PATH, STATUS_PATH};

// Service
pub use service::{ClassifyOutcome, CrawlOutcome, Crawler, RoundSummary, ScanOutcome};

// Adapters
pub use adapters::{
    parse_seed_lines, render_table, write_report, ConfigError, ExportError, HttpProbe,
    ScanConfig, SeedError, SeedSources, SystemTimeSource, WrittenArtifacts,
};
