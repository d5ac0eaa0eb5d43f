//! # Domain Layer
//!
//! Pure data and parsing. No I/O happens here: bodies come in as strings,
//! records and endpoint sets go out.

pub mod config;
pub mod endpoint;
pub mod genesis;
pub mod peers;
pub mod record;
pub mod report;
pub mod status;

pub use config::{ConfigError, ScanConfig, DEFAULT_NETWORK_ID};
pub use endpoint::{Endpoint, EndpointError, DEFAULT_RPC_PORT};
pub use genesis::{extract_genesis_ips, genesis_endpoints, is_public_ipv4};
pub use peers::extract_peers;
pub use record::{Classification, RecordRow, Unavailable, ValidatorRecord, COLUMNS, NOT_DETERMINED};
pub use report::Report;
pub use status::classify;
