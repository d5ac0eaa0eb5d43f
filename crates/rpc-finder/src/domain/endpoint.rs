//! Node endpoint identity.

use std::fmt;

/// Default Tendermint RPC port, used when a peer does not advertise one.
pub const DEFAULT_RPC_PORT: u16 = 26657;

/// A node's RPC base URL, e.g. `http://1.2.3.4:26657`.
///
/// Identity is the exact string. No DNS resolution or canonicalization is
/// performed beyond construction from an IP and a port.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Endpoint(String);

/// Errors when parsing an endpoint from free text (seed files, CLI).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("endpoint is empty")]
    Empty,
    #[error("endpoint {0:?} has no http:// or https:// scheme")]
    MissingScheme(String),
}

impl Endpoint {
    /// Build `http://{ip}:{port}`.
    pub fn from_ip_port(ip: &str, port: u16) -> Self {
        Self(format!("http://{ip}:{port}"))
    }

    /// Parse a seed line. Surrounding whitespace is trimmed; the rest is kept literally.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EndpointError::Empty);
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(EndpointError::MissingScheme(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Full URL for `path` on this node.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
