//! Report Builder.

use super::record::{RecordRow, ValidatorRecord};

/// Derived view over classified records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Every available record, in caller order.
    pub available: Vec<ValidatorRecord>,
    /// Records with strictly positive voting power, in caller order.
    pub vulnerable: Vec<ValidatorRecord>,
    /// Sum of voting power across `vulnerable`.
    pub affected_stake: i128,
}

impl Report {
    pub fn build(records: Vec<ValidatorRecord>) -> Self {
        let vulnerable: Vec<_> = records
            .iter()
            .filter(|r| r.is_vulnerable())
            .cloned()
            .collect();
        let affected_stake = vulnerable.iter().map(|r| i128::from(r.voting_power)).sum();

        Self {
            available: records,
            vulnerable,
            affected_stake,
        }
    }

    pub fn has_vulnerable(&self) -> bool {
        !self.vulnerable.is_empty()
    }

    pub fn available_rows(&self) -> Vec<RecordRow> {
        self.available.iter().map(ValidatorRecord::row).collect()
    }

    pub fn vulnerable_rows(&self) -> Vec<RecordRow> {
        self.vulnerable.iter().map(ValidatorRecord::row).collect()
    }

    /// One-line totals for the console.
    pub fn summary(&self) -> String {
        format!(
            "TOTAL VULNERABLE VALIDATORS: {} | TOTAL AFFECTED STAKE: {}",
            self.vulnerable.len(),
            self.affected_stake
        )
    }
}
