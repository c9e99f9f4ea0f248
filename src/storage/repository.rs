//! Persistence adapter between the ledger and its key-value store.

use crate::domain::ExpenseRecord;

use super::{codec, KeyValueStore, LoadReport, Result, STORAGE_KEY};

/// Reads and writes the whole ledger as a single blob under one key.
///
/// There is no caching: every `load` is a full read and every `save` a full
/// overwrite.
pub struct ExpenseRepository {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl ExpenseRepository {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the stored ledger. Never fails: an absent blob yields an empty
    /// report, and an unreadable or corrupt one is logged and treated as empty.
    pub fn load(&self) -> LoadReport {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored ledger, starting empty");
                return LoadReport::missing();
            }
            Err(err) => {
                tracing::error!(key = %self.key, error = %err, "failed to read stored ledger");
                return LoadReport::corrupt(err.to_string());
            }
        };

        let report = codec::decode_records(&raw);
        match &report.status {
            super::LoadStatus::Corrupt(reason) => {
                tracing::error!(key = %self.key, %reason, "stored ledger is corrupt, starting empty");
            }
            _ => tracing::debug!(
                key = %self.key,
                records = report.records.len(),
                dropped = report.warnings.len(),
                "loaded stored ledger"
            ),
        }
        report
    }

    /// Overwrites the stored blob with `records`.
    pub fn save(&self, records: &[ExpenseRecord]) -> Result<()> {
        let json = codec::encode_records(records)?;
        self.store.set(&self.key, &json)?;
        tracing::debug!(key = %self.key, records = records.len(), "saved ledger");
        Ok(())
    }
}
