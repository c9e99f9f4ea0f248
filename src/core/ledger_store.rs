//! The ledger store: single owner of the expense list and the only place it
//! is mutated.

use std::{collections::HashSet, path::Path};

use rust_decimal::Decimal;

use crate::{
    domain::{ExpenseDate, ExpenseId, ExpenseRecord, NewExpense},
    errors::{LedgerError, MalformedRecordWarning, Result},
    storage::{self, ExpenseRepository, LoadStatus},
};

use super::{
    summary::{LedgerOverview, SummaryService},
    time::{Clock, SystemClock},
};

/// Owns the canonical in-memory record list and persists it after every
/// mutation.
///
/// When a save fails the mutation is kept in memory and the call returns
/// [`LedgerError::Persistence`]; the in-memory list stays authoritative for
/// the rest of the session.
pub struct LedgerStore {
    records: Vec<ExpenseRecord>,
    repository: ExpenseRepository,
    clock: Box<dyn Clock>,
    revision: u64,
    load_status: LoadStatus,
    load_warnings: Vec<MalformedRecordWarning>,
}

impl LedgerStore {
    /// Loads the persisted ledger and seeds the store with it.
    pub fn initialize(repository: ExpenseRepository, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            records: Vec::new(),
            repository,
            clock,
            revision: 0,
            load_status: LoadStatus::Missing,
            load_warnings: Vec::new(),
        };
        store.reload();
        tracing::info!(records = store.records.len(), "ledger initialized");
        store
    }

    pub fn with_system_clock(repository: ExpenseRepository) -> Self {
        Self::initialize(repository, Box::new(SystemClock))
    }

    /// Discards the in-memory list and re-reads the durable store.
    pub fn reload(&mut self) {
        let report = self.repository.load();
        self.records = report.records;
        self.load_status = report.status;
        self.load_warnings = report.warnings;
        self.revision += 1;
    }

    /// Validates and appends a new expense, returning the stored record.
    pub fn add(&mut self, draft: NewExpense) -> Result<ExpenseRecord> {
        if let Err(err) = draft.validate() {
            tracing::debug!(error = %err, "rejected expense candidate");
            return Err(err.into());
        }
        let id = self.fresh_id();
        let date = draft
            .date
            .unwrap_or_else(|| ExpenseDate::Day(self.clock.today()));
        let record = ExpenseRecord::from_parts(id, draft, date);
        tracing::debug!(id = %record.id, amount = %record.amount, "adding expense");
        self.records.push(record.clone());
        self.commit(true)?;
        Ok(record)
    }

    /// Removes the record with `id`. Absent ids are a no-op; the ledger is
    /// persisted either way. Returns whether a record was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let position = self.records.iter().position(|record| record.id == *id);
        if let Some(index) = position {
            let removed = self.records.remove(index);
            tracing::debug!(id = %removed.id, "removed expense");
        }
        self.commit(position.is_some())?;
        Ok(position.is_some())
    }

    /// Empties the ledger, returning how many records were dropped.
    pub fn clear_all(&mut self) -> Result<usize> {
        let cleared = self.records.len();
        self.records.clear();
        tracing::info!(cleared, "cleared ledger");
        self.commit(true)?;
        Ok(cleared)
    }

    /// Replaces the whole ledger. Later duplicates of an id and records
    /// breaking the title/amount invariants are skipped.
    pub fn replace_all(&mut self, records: Vec<ExpenseRecord>) -> Result<usize> {
        let mut seen = HashSet::new();
        let mut accepted = Vec::with_capacity(records.len());
        for record in records {
            if record.title.trim().is_empty() || record.amount <= Decimal::ZERO {
                tracing::warn!(id = %record.id, "skipping invalid record during replace");
                continue;
            }
            if !seen.insert(record.id.clone()) {
                tracing::warn!(id = %record.id, "skipping duplicate record during replace");
                continue;
            }
            accepted.push(record);
        }
        let count = accepted.len();
        self.records = accepted;
        self.commit(true)?;
        Ok(count)
    }

    /// Replaces the ledger with the contents of an exported file.
    ///
    /// A file that cannot be read or parsed leaves the ledger untouched.
    pub fn import_file(&mut self, path: &Path) -> Result<Vec<MalformedRecordWarning>> {
        let report = storage::import_records(path)?;
        let imported = self.replace_all(report.records)?;
        tracing::info!(path = %path.display(), imported, "imported ledger");
        Ok(report.warnings)
    }

    /// Writes the current ledger to a standalone JSON file.
    pub fn export_file(&self, path: &Path) -> Result<()> {
        storage::export_records(&self.records, path)?;
        Ok(())
    }

    /// Read-only view of the current records, in insertion order.
    pub fn get_all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == *id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Incremented whenever the record list changes; derived views computed
    /// at an older revision are stale.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Records dropped by the most recent load.
    pub fn load_warnings(&self) -> &[MalformedRecordWarning] {
        &self.load_warnings
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Dashboard views computed against the store's clock.
    pub fn overview(&self, recent_limit: usize) -> LedgerOverview<'_> {
        SummaryService::overview(&self.records, self.clock.now(), recent_limit)
    }

    fn fresh_id(&self) -> ExpenseId {
        loop {
            let id = ExpenseId::generate();
            if !self.records.iter().any(|record| record.id == id) {
                return id;
            }
        }
    }

    fn commit(&mut self, changed: bool) -> Result<()> {
        if changed {
            self.revision += 1;
        }
        self.repository.save(&self.records).map_err(|err| {
            tracing::warn!(error = %err, "ledger changed in memory but could not be saved");
            LedgerError::Persistence(err)
        })
    }
}
