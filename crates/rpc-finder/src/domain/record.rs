//! Validator classification records.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::endpoint::Endpoint;

/// Rendering of a field this scan cannot determine from `/status`.
pub const NOT_DETERMINED: &str = "N/A";

/// Output column order shared by the table and both CSV files.
pub const COLUMNS: [&str; 11] = [
    "Endpoint",
    "EVM Port",
    "Block Height",
    "Tx Index",
    "Archival",
    "Moniker",
    "Validator",
    "Version",
    "Scan Time",
    "Syncing?",
    "Voting Power",
];

/// One endpoint's `/status` classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRecord {
    pub endpoint: Endpoint,
    pub network: String,
    pub moniker: String,
    /// Hex consensus address from `validator_info.address`.
    pub validator_address: String,
    pub block_height: u64,
    pub catching_up: bool,
    pub voting_power: i64,
    pub version: String,
    pub scan_time: DateTime<Utc>,
    /// `None` means not determined.
    pub evm_port: Option<u16>,
    pub tx_index: Option<bool>,
    pub archival: Option<bool>,
}

/// A flat row in [`COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    #[serde(rename = "Endpoint")]
    pub endpoint: String,
    #[serde(rename = "EVM Port")]
    pub evm_port: String,
    #[serde(rename = "Block Height")]
    pub block_height: String,
    #[serde(rename = "Tx Index")]
    pub tx_index: String,
    #[serde(rename = "Archival")]
    pub archival: String,
    #[serde(rename = "Moniker")]
    pub moniker: String,
    #[serde(rename = "Validator")]
    pub validator: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Scan Time")]
    pub scan_time: String,
    #[serde(rename = "Syncing?")]
    pub syncing: String,
    #[serde(rename = "Voting Power")]
    pub voting_power: String,
}

impl ValidatorRecord {
    /// Strictly positive voting power. Zero and negative values are not vulnerable.
    pub fn is_vulnerable(&self) -> bool {
        self.voting_power > 0
    }

    pub fn row(&self) -> RecordRow {
        RecordRow {
            endpoint: self.endpoint.to_string(),
            evm_port: render_opt(self.evm_port),
            block_height: self.block_height.to_string(),
            tx_index: render_opt(self.tx_index),
            archival: render_opt(self.archival),
            moniker: self.moniker.clone(),
            validator: self.validator_address.clone(),
            version: self.version.clone(),
            scan_time: self.scan_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            syncing: self.catching_up.to_string(),
            voting_power: self.voting_power.to_string(),
        }
    }
}

impl RecordRow {
    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 11] {
        [
            self.endpoint.as_str(),
            self.evm_port.as_str(),
            self.block_height.as_str(),
            self.tx_index.as_str(),
            self.archival.as_str(),
            self.moniker.as_str(),
            self.validator.as_str(),
            self.version.as_str(),
            self.scan_time.as_str(),
            self.syncing.as_str(),
            self.voting_power.as_str(),
        ]
    }
}

fn render_opt<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_DETERMINED.to_string(), |v| v.to_string())
}

/// Why an endpoint produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// The probe itself failed (transport, timeout, non-200).
    ProbeFailed(String),
    /// Body is not JSON-RPC, carries an `error`, or lacks required fields.
    Malformed(String),
    /// Node belongs to another network.
    WrongNetwork(String),
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProbeFailed(reason) => write!(f, "probe failed: {reason}"),
            Self::Malformed(reason) => write!(f, "malformed status: {reason}"),
            Self::WrongNetwork(network) => write!(f, "wrong network: {network}"),
        }
    }
}

/// Result of classifying one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Available(ValidatorRecord),
    Unavailable(Unavailable),
}

impl Classification {
    pub fn into_record(self) -> Option<ValidatorRecord> {
        match self {
            Self::Available(record) => Some(record),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(voting_power: i64) -> ValidatorRecord {
        ValidatorRecord {
            endpoint: Endpoint::from_ip_port("1.2.3.4", 26657),
            network: "odyssey-0".into(),
            moniker: "node-a".into(),
            validator_address: "ABCDEF".into(),
            block_height: 42,
            catching_up: false,
            voting_power,
            version: "0.37.2".into(),
            scan_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            evm_port: None,
            tx_index: None,
            archival: None,
        }
    }

    #[test]
    fn test_row_follows_column_order() {
        let row = record(7).row();
        assert_eq!(
            row.cells(),
            [
                "http://1.2.3.4:26657",
                "N/A",
                "42",
                "N/A",
                "N/A",
                "node-a",
                "ABCDEF",
                "0.37.2",
                "2024-05-01T12:00:00Z",
                "false",
                "7",
            ]
        );
    }

    #[test]
    fn test_vulnerability_is_strictly_positive() {
        assert!(!record(0).is_vulnerable());
        assert!(!record(-1).is_vulnerable());
        assert!(record(1).is_vulnerable());
    }

    #[test]
    fn test_determined_fields_render_values() {
        let mut r = record(1);
        r.evm_port = Some(8545);
        r.archival = Some(true);
        let row = r.row();
        assert_eq!(row.evm_port, "8545");
        assert_eq!(row.archival, "true");
        assert_eq!(row.tx_index, NOT_DETERMINED);
    }
}
