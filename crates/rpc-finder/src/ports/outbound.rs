//! # Driven Ports (Outbound SPI)
//!
//! Interfaces the crawler requires from the host: network access and a clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Endpoint;

/// Peer-list path on a Tendermint RPC node.
pub const NET_INFO_PATH: &str = "/net_info";

/// Node status path on a Tendermint RPC node.
pub const STATUS_PATH: &str = "/status";

/// Outcome of a single probe: the raw body on HTTP 200, otherwise the failure.
pub type ProbeResult = Result<String, ProbeError>;

/// Why a probe produced no body.
///
/// This is the probe failure sentinel. The crawler never propagates it; it
/// only decides that the endpoint contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("unreadable response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Abstract interface for fetching a node endpoint.
///
/// Implementations must bound every call by their configured timeout and
/// must not panic; every failure is reported as a [`ProbeError`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the crawler drives many probes
/// concurrently from a single shared instance.
#[async_trait]
pub trait NodeProbe: Send + Sync {
    /// GET `{endpoint}{path}` with `accept: application/json`.
    async fn probe(&self, endpoint: &Endpoint, path: &str) -> ProbeResult;

    /// GET an arbitrary URL (used for genesis documents).
    async fn fetch(&self, url: &str) -> ProbeResult;
}

/// Abstract interface for wall-clock time.
///
/// Enables deterministic scan timestamps in tests.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
