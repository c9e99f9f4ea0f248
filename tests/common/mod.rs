#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use expense_ledger::{
    core::{FixedClock, LedgerStore},
    storage::{ExpenseRepository, FileStore, KeyValueStore, MemoryStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fixed "now" shared by the suites: 2024-03-01 10:00 local time.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// A fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn store_over(backend: impl KeyValueStore + 'static) -> LedgerStore {
    let repository = ExpenseRepository::new(Box::new(backend));
    LedgerStore::initialize(repository, Box::new(FixedClock(now())))
}

/// Ledger backed by a memory store; the returned handle sees the same data.
pub fn memory_ledger() -> (LedgerStore, MemoryStore) {
    let backend = MemoryStore::new();
    (store_over(backend.clone()), backend)
}

/// Ledger backed by files in a unique directory.
pub fn file_ledger() -> (LedgerStore, PathBuf) {
    let dir = temp_dir().join("data");
    let backend = FileStore::new(dir.clone()).expect("create file store");
    (store_over(backend), dir)
}
