//! Durable storage for the ledger blob.
//!
//! The ledger lives as one JSON array under a single fixed key of a
//! [`KeyValueStore`]. [`ExpenseRepository`] is the only type that reads or
//! writes that key.

pub mod codec;
pub mod export;
pub mod file_store;
pub mod memory_store;
pub mod repository;

use crate::errors::PersistenceError;

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Key under which the serialized ledger is stored.
pub const STORAGE_KEY: &str = "smart_expense_data_v1";

/// Minimal string key-value medium the ledger blob is persisted to.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replaces the value under `key` in full.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub use codec::{decode_records, encode_records, LoadReport, LoadStatus};
pub use export::{export_records, import_records};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use repository::ExpenseRepository;
