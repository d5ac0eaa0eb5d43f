//! Seed loading: the local seed file and the genesis seed cache.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::domain::{genesis_endpoints, Endpoint, ScanConfig};
use crate::ports::NodeProbe;

/// Errors reading or writing seed files.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("cannot read seed file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write seed cache {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Where seeds come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSources {
    pub rpc_file: PathBuf,
    pub genesis_url: Option<String>,
    pub genesis_cache: PathBuf,
    pub default_rpc_port: u16,
}

impl SeedSources {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            rpc_file: config.rpc_file_name.clone(),
            genesis_url: config.genesis_file_url.clone(),
            genesis_cache: config.genesis_file_name.clone(),
            default_rpc_port: config.default_rpc_port,
        }
    }

    /// Endpoints from the local seed file. A missing file is an error.
    pub fn read_rpc_file(&self) -> Result<BTreeSet<Endpoint>, SeedError> {
        read_seed_file(&self.rpc_file)
    }

    /// Genesis seeds: from the cache if it holds any, otherwise downloaded and cached.
    ///
    /// A failed download yields no seeds; only cache I/O errors are returned.
    /// A download with no public IPs leaves no cache behind, so the next run
    /// downloads again.
    pub async fn genesis_seeds<P: NodeProbe>(
        &self,
        probe: &P,
    ) -> Result<BTreeSet<Endpoint>, SeedError> {
        if self.genesis_cache.is_file() {
            info!(path = %self.genesis_cache.display(), "reading IPs from genesis cache");
            let cached = read_seed_file(&self.genesis_cache)?;
            if !cached.is_empty() {
                return Ok(cached);
            }
            warn!(path = %self.genesis_cache.display(), "genesis cache is empty, ignoring it");
        }

        let Some(url) = &self.genesis_url else {
            return Ok(BTreeSet::new());
        };

        info!(
            path = %self.genesis_cache.display(),
            %url,
            "genesis cache not found, downloading"
        );
        let body = match probe.fetch(url).await {
            Ok(body) => body,
            Err(err) => {
                warn!(%url, error = %err, "genesis download failed");
                return Ok(BTreeSet::new());
            }
        };

        let seeds = genesis_endpoints(&body, self.default_rpc_port);
        info!(public_ips = seeds.len(), "filtered private IPs from genesis");
        if seeds.is_empty() {
            warn!(%url, "genesis document has no public IPs, not caching");
        } else {
            write_seed_file(&self.genesis_cache, &seeds)?;
        }
        Ok(seeds)
    }

    /// Genesis seeds ∪ seed-file seeds.
    pub async fn load<P: NodeProbe>(&self, probe: &P) -> Result<BTreeSet<Endpoint>, SeedError> {
        let mut seeds = self.genesis_seeds(probe).await?;
        seeds.extend(self.read_rpc_file()?);
        Ok(seeds)
    }
}

/// Parse seed lines. Blank lines are ignored; unparsable lines are skipped with a warning.
pub fn parse_seed_lines(content: &str) -> BTreeSet<Endpoint> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match Endpoint::parse(line) {
            Ok(endpoint) => Some(endpoint),
            Err(err) => {
                warn!(line, error = %err, "skipping seed");
                None
            }
        })
        .collect()
}

fn read_seed_file(path: &Path) -> Result<BTreeSet<Endpoint>, SeedError> {
    let content = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_seed_lines(&content))
}

fn write_seed_file(path: &Path, seeds: &BTreeSet<Endpoint>) -> Result<(), SeedError> {
    let mut content = String::new();
    for seed in seeds {
        content.push_str(seed.as_str());
        content.push('\n');
    }
    fs::write(path, content).map_err(|source| SeedError::Write {
        path: path.display().to_string(),
        source,
    })
}
