use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::errors::PersistenceError;

use super::{KeyValueStore, Result};

/// In-process key-value store. Clones share the same map, so a caller can
/// keep a handle to inspect what the ledger wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(limit) = self.quota {
            if value.len() > limit {
                return Err(PersistenceError::QuotaExceeded {
                    needed: value.len(),
                    limit,
                });
            }
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        let handle = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(handle.get("k").unwrap().as_deref(), Some("v"));
        handle.set("k", "w").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("w"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn quota_is_enforced() {
        let store = MemoryStore::with_quota(2);
        assert!(store.set("k", "[]").is_ok());
        assert!(matches!(
            store.set("k", "[1]"),
            Err(PersistenceError::QuotaExceeded { needed: 3, limit: 2 })
        ));
    }
}
