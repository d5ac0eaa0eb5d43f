//! Centralized Testing Utilities
//!
//! In-memory probe and clock for exercising the crawler without a network.
//! Available under `cfg(test)` and with the `test-utils` feature flag.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::domain::Endpoint;
use crate::ports::{NodeProbe, ProbeError, ProbeResult, TimeSource, NET_INFO_PATH, STATUS_PATH};

/// A time source that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    at: DateTime<Utc>,
}

impl FixedTimeSource {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Fixed at `secs` seconds after the Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Self {
            at: Utc.timestamp_opt(secs, 0).single().unwrap_or_default(),
        }
    }
}

impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

/// `/net_info` body listing `peers` as `(remote_ip, rpc_address)` pairs.
pub fn net_info_body(peers: &[(&str, &str)]) -> String {
    let peers: Vec<_> = peers
        .iter()
        .map(|(ip, rpc)| {
            json!({
                "remote_ip": ip,
                "node_info": { "other": { "tx_index": "on", "rpc_address": rpc } }
            })
        })
        .collect();
    json!({
        "jsonrpc": "2.0",
        "id": -1,
        "result": { "listening": true, "n_peers": peers.len().to_string(), "peers": peers }
    })
    .to_string()
}

/// `/status` body for a node on `network` with the given voting power.
pub fn status_body(network: &str, moniker: &str, voting_power: i64) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": -1,
        "result": {
            "node_info": { "network": network, "moniker": moniker, "version": "0.37.2" },
            "sync_info": { "latest_block_height": "1000", "catching_up": false },
            "validator_info": {
                "address": format!("ADDR-{moniker}"),
                "voting_power": voting_power.to_string()
            }
        }
    })
    .to_string()
}

/// Mock probe answering from a fixed table.
///
/// Unconfigured `(endpoint, path)` pairs fail with `ProbeError::Connect`.
/// Every call is recorded as `(url, path)`; `fetch` calls use an empty path.
/// The peak number of concurrent calls is tracked.
#[derive(Debug, Default)]
pub struct MockProbe {
    responses: HashMap<(String, String), ProbeResult>,
    latency: Option<Duration>,
    endpoint_latency: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, String)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a raw response for `url`.
    pub fn with_response(mut self, url: &str, path: &str, result: ProbeResult) -> Self {
        self.responses
            .insert((url.to_string(), path.to_string()), result);
        self
    }

    /// `/net_info` on `endpoint` reports `peers`, each given as `ip:port`.
    pub fn with_peers(self, endpoint: &str, peers: &[&str]) -> Self {
        let pairs: Vec<(String, String)> = peers
            .iter()
            .map(|p| {
                let (ip, port) = p.rsplit_once(':').unwrap_or((*p, ""));
                (ip.to_string(), format!("tcp://0.0.0.0:{port}"))
            })
            .collect();
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        self.with_response(endpoint, NET_INFO_PATH, Ok(net_info_body(&refs)))
    }

    /// `/status` on `endpoint` reports a node on `network`.
    pub fn with_status(self, endpoint: &str, network: &str, voting_power: i64) -> Self {
        let moniker = endpoint.trim_start_matches("http://").replace([':', '.'], "-");
        self.with_response(
            endpoint,
            STATUS_PATH,
            Ok(status_body(network, &moniker, voting_power)),
        )
    }

    /// Every call sleeps for `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Calls to `endpoint` sleep for `latency`, overriding [`Self::with_latency`].
    pub fn with_endpoint_latency(mut self, endpoint: &str, latency: Duration) -> Self {
        self.endpoint_latency.insert(endpoint.to_string(), latency);
        self
    }

    /// All calls so far, in arrival order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls to `path` on `endpoint`.
    pub fn call_count(&self, endpoint: &str, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(e, p)| e == endpoint && p == path)
            .count()
    }

    /// Highest number of calls that were in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn answer(&self, key: (String, String)) -> ProbeResult {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(latency) = self.endpoint_latency.get(&key.0).or(self.latency.as_ref()) {
            tokio::time::sleep(*latency).await;
        }

        let result = self
            .responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::Connect(format!("no route to {}", key.0))));

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl NodeProbe for MockProbe {
    async fn probe(&self, endpoint: &Endpoint, path: &str) -> ProbeResult {
        self.answer((endpoint.to_string(), path.to_string())).await
    }

    async fn fetch(&self, url: &str) -> ProbeResult {
        self.answer((url.to_string(), String::new())).await
    }
}
