//! Status Classifier: turns a `/status` body into a [`Classification`].

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::endpoint::Endpoint;
use super::record::{Classification, Unavailable, ValidatorRecord};

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    jsonrpc: Option<String>,
    #[serde(default)]
    error: Option<Value>,
    result: Option<StatusResult>,
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    node_info: NodeInfo,
    sync_info: SyncInfo,
    validator_info: ValidatorInfo,
}

#[derive(Debug, Deserialize)]
struct NodeInfo {
    network: String,
    moniker: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct SyncInfo {
    latest_block_height: IntLike,
    catching_up: bool,
}

#[derive(Debug, Deserialize)]
struct ValidatorInfo {
    address: String,
    voting_power: IntLike,
}

/// Tendermint encodes 64-bit integers as JSON strings; accept both forms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntLike {
    Number(i64),
    Text(String),
}

impl IntLike {
    fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Classify `endpoint` from its `/status` body.
///
/// Anything short of a well-formed JSON-RPC status for `network_id`
/// classifies as [`Classification::Unavailable`]; nothing here panics or
/// returns an error.
pub fn classify(
    endpoint: &Endpoint,
    body: &str,
    network_id: &str,
    scan_time: DateTime<Utc>,
) -> Classification {
    match parse_status(endpoint, body, network_id, scan_time) {
        Ok(record) => Classification::Available(record),
        Err(reason) => Classification::Unavailable(reason),
    }
}

fn parse_status(
    endpoint: &Endpoint,
    body: &str,
    network_id: &str,
    scan_time: DateTime<Utc>,
) -> Result<ValidatorRecord, Unavailable> {
    let envelope: StatusEnvelope =
        serde_json::from_str(body).map_err(|e| Unavailable::Malformed(e.to_string()))?;

    if envelope.jsonrpc.is_none() {
        return Err(Unavailable::Malformed("missing jsonrpc marker".into()));
    }
    if let Some(error) = envelope.error.filter(|e| !e.is_null()) {
        return Err(Unavailable::Malformed(format!("rpc error: {error}")));
    }
    let result = envelope
        .result
        .ok_or_else(|| Unavailable::Malformed("missing result".into()))?;

    if result.node_info.network != network_id {
        return Err(Unavailable::WrongNetwork(result.node_info.network));
    }

    let block_height = result
        .sync_info
        .latest_block_height
        .to_i64()
        .and_then(|h| u64::try_from(h).ok())
        .ok_or_else(|| Unavailable::Malformed("bad latest_block_height".into()))?;
    let voting_power = result
        .validator_info
        .voting_power
        .to_i64()
        .ok_or_else(|| Unavailable::Malformed("bad voting_power".into()))?;

    Ok(ValidatorRecord {
        endpoint: endpoint.clone(),
        network: result.node_info.network,
        moniker: result.node_info.moniker,
        validator_address: result.validator_info.address,
        block_height,
        catching_up: result.sync_info.catching_up,
        voting_power,
        version: result.node_info.version,
        scan_time,
        evm_port: None,
        tx_index: None,
        archival: None,
    })
}
