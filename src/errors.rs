use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejection of a candidate expense before it reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("amount `{0}` is not a number")]
    InvalidAmount(String),
    #[error("date `{0}` is not an ISO-8601 date or date-time")]
    InvalidDate(String),
}

/// Failure to read or write the durable store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },
    #[error("corrupt ledger data: {0}")]
    Corrupt(String),
}

/// Error surfaced by ledger mutations.
///
/// `Persistence` means the in-memory mutation was applied but could not be
/// saved; the ledger keeps the new state for the rest of the session.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl LedgerError {
    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Persistence(_))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// A stored entry that failed shape checks and was left out of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecordWarning {
    pub index: usize,
    pub id: Option<String>,
    pub reason: String,
}

impl MalformedRecordWarning {
    pub fn new(index: usize, id: Option<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            id,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedRecordWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "record #{} ({}) dropped: {}", self.index, id, self.reason),
            None => write!(f, "record #{} dropped: {}", self.index, self.reason),
        }
    }
}

/// Failure that ends the interactive shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}
