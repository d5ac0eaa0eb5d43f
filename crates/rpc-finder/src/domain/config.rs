//! Scan configuration.
//!
//! One immutable value, loaded once by the host (see `adapters::config`) and
//! handed to the crawler at construction.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use super::endpoint::DEFAULT_RPC_PORT;

/// Default network id for the classification filter.
pub const DEFAULT_NETWORK_ID: &str = "odyssey-0";

/// Scan parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Only nodes reporting this `node_info.network` are classified.
    pub network_id: String,
    /// RPC port assumed when a peer advertises none.
    pub default_rpc_port: u16,
    /// Per-request timeout in seconds.
    pub provider_timeout: u64,
    /// Maximum in-flight probes per round.
    pub threads_count: usize,
    /// Local seed file, one endpoint per line.
    pub rpc_file_name: PathBuf,
    /// Document scraped for seed IPs when no genesis cache exists.
    pub genesis_file_url: Option<String>,
    /// Flat cache of genesis seed endpoints.
    pub genesis_file_name: PathBuf,
    /// Output directory for CSV artifacts.
    pub results_dir: PathBuf,
    pub verbose_mode: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            network_id: DEFAULT_NETWORK_ID.to_string(),
            default_rpc_port: DEFAULT_RPC_PORT,
            provider_timeout: 5,
            threads_count: 16,
            rpc_file_name: PathBuf::from("rpc.txt"),
            genesis_file_url: None,
            genesis_file_name: PathBuf::from("genesis_ips.txt"),
            results_dir: PathBuf::from("results"),
            verbose_mode: false,
        }
    }
}

/// Configuration errors. All of them abort the run before crawling.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ScanConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout)
    }

    /// Reject values the crawler cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network_id.trim().is_empty() {
            return Err(ConfigError::Invalid("network_id must not be empty".into()));
        }
        if self.default_rpc_port == 0 {
            return Err(ConfigError::Invalid("default_rpc_port must be non-zero".into()));
        }
        if self.provider_timeout == 0 {
            return Err(ConfigError::Invalid("provider_timeout must be at least 1 second".into()));
        }
        if self.threads_count == 0 {
            return Err(ConfigError::Invalid("threads_count must be at least 1".into()));
        }
        Ok(())
    }
}
