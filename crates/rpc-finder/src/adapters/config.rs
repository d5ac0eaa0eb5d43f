//! YAML configuration loading.
//!
//! # Config File Format
//!
//! ```yaml
//! network_id: odyssey-0
//! default_rpc_port: 26657
//! provider_timeout: 5
//! threads_count: 64
//! rpc_file_name: rpc.txt
//! genesis_file_url: https://example.org/genesis.json
//! genesis_file_name: genesis_ips.txt
//! results_dir: results
//! verbose_mode: false
//! ```
//!
//! Every key is optional; missing keys take [`ScanConfig::default`] values.

use std::fs;
use std::path::Path;

use crate::domain::{ConfigError, ScanConfig};

impl ScanConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed, or fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file without validating, for callers that apply
    /// overrides before calling [`ScanConfig::validate`].
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config = Self::from_yaml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML string without validating.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(ScanConfig::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
