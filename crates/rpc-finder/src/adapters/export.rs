//! CSV artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{RecordRow, Report, COLUMNS};

/// All available records.
pub const VALID_RPC_FILE: &str = "valid_rpc.csv";

/// Records with positive voting power.
pub const VULNERABLE_FILE: &str = "vulnerable_validators.csv";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot create {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write csv {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Paths written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub valid_rpc: PathBuf,
    pub vulnerable: PathBuf,
}

/// Write both CSV files under `dir`, creating it if needed.
///
/// Both files always get the header row, even when empty.
pub fn write_report(dir: &Path, report: &Report) -> Result<WrittenArtifacts, ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let artifacts = WrittenArtifacts {
        valid_rpc: dir.join(VALID_RPC_FILE),
        vulnerable: dir.join(VULNERABLE_FILE),
    };
    write_rows(&artifacts.valid_rpc, &report.available_rows())?;
    write_rows(&artifacts.vulnerable, &report.vulnerable_rows())?;
    Ok(artifacts)
}

/// Write `rows` to `path` with the fixed column header.
pub fn write_rows(path: &Path, rows: &[RecordRow]) -> Result<(), ExportError> {
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(COLUMNS).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}
