//! Peer Extractor: turns a `/net_info` body into candidate RPC endpoints.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde_json::Value;

use super::endpoint::Endpoint;

#[derive(Debug, Deserialize)]
struct NetInfoEnvelope {
    #[serde(default)]
    result: Option<NetInfoResult>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct NetInfoResult {
    #[serde(default)]
    peers: Vec<Value>,
}

/// One entry of `result.peers[]`. Only the fields we need.
#[derive(Debug, Deserialize)]
struct PeerDescriptor {
    remote_ip: String,
    node_info: PeerNodeInfo,
}

#[derive(Debug, Deserialize)]
struct PeerNodeInfo {
    other: PeerOther,
}

#[derive(Debug, Deserialize)]
struct PeerOther {
    rpc_address: String,
}

/// Extract `http://{remote_ip}:{rpc_port}` endpoints from a `/net_info` body.
///
/// Entries missing `remote_ip` or `node_info.other.rpc_address` are skipped
/// without affecting the others. An advertised address with no usable port
/// falls back to `default_port`. An unusable body (not JSON, JSON-RPC error,
/// no `result`) yields an empty set.
pub fn extract_peers(body: &str, default_port: u16) -> BTreeSet<Endpoint> {
    let envelope: NetInfoEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) => return BTreeSet::new(),
    };

    if envelope.error.as_ref().is_some_and(|e| !e.is_null()) {
        return BTreeSet::new();
    }

    let Some(result) = envelope.result else {
        return BTreeSet::new();
    };

    result
        .peers
        .into_iter()
        .filter_map(|raw| serde_json::from_value::<PeerDescriptor>(raw).ok())
        .filter(|peer| !peer.remote_ip.trim().is_empty())
        .map(|peer| {
            let port = rpc_port(&peer.node_info.other.rpc_address).unwrap_or(default_port);
            Endpoint::from_ip_port(peer.remote_ip.trim(), port)
        })
        .collect()
}

/// Port of a listen address such as `tcp://0.0.0.0:26657`.
fn rpc_port(rpc_address: &str) -> Option<u16> {
    let (_, port) = rpc_address.rsplit_once(':')?;
    match port.trim().parse::<u16>() {
        Ok(0) | Err(_) => None,
        Ok(port) => Some(port),
    }
}
