//! # Adapters
//!
//! Concrete implementations of the ports plus the file-facing glue:
//!
//! - `http` - reqwest `NodeProbe`
//! - `config` - YAML `ScanConfig` loading
//! - `seeds` - seed file and genesis seed cache
//! - `export` - CSV artifacts
//! - `table` - console table
//! - `time` - system clock

pub mod config;
pub mod export;
pub mod http;
pub mod seeds;
pub mod table;
pub mod time;

pub use crate::domain::{ConfigError, ScanConfig};
pub use export::{write_report, ExportError, WrittenArtifacts, VALID_RPC_FILE, VULNERABLE_FILE};
pub use http::HttpProbe;
pub use seeds::{parse_seed_lines, SeedError, SeedSources};
pub use table::render_table;
pub use time::SystemTimeSource;
