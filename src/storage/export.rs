//! One-off JSON backup files in the same shape as the stored blob.

use std::{fs, path::Path};

use crate::{domain::ExpenseRecord, errors::PersistenceError};

use super::{
    codec,
    file_store::{tmp_path, write_atomic},
    LoadReport, Result,
};

/// Default file name for user-initiated exports.
pub const EXPORT_FILE_NAME: &str = "expenses.json";

/// Writes `records` as a pretty-printed JSON array to `path`.
pub fn export_records(records: &[ExpenseRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    tracing::info!(path = %path.display(), records = records.len(), "exported ledger");
    Ok(())
}

/// Reads an exported file with the same tolerant rules as the stored blob.
///
/// Unlike a durable load, a file that is not a JSON array is an error so a
/// bad import never wipes the ledger.
pub fn import_records(path: &Path) -> Result<LoadReport> {
    let raw = fs::read_to_string(path)?;
    let report = codec::decode_records(&raw);
    if let codec::LoadStatus::Corrupt(reason) = &report.status {
        return Err(PersistenceError::Corrupt(format!(
            "{}: {}",
            path.display(),
            reason
        )));
    }
    Ok(report)
}
