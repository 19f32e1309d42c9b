//! In-memory key-value store
//!
//! Handles are cheap clones sharing one map, so a test can keep a handle to
//! inspect or sabotage the store after giving another handle away.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{ExpenseError, ExpenseResult};

use super::kv::KeyValueStore;

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

/// Volatile key-value store with failure injection
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> ExpenseResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire lock: {}", e)))
    }

    /// Make every subsequent `get` fail
    pub fn set_fail_reads(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_reads = fail;
        }
    }

    /// Make every subsequent `set`/`delete` fail
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.lock() {
            state.fail_writes = fail;
        }
    }

    /// Number of successful `set`/`delete` calls so far
    pub fn write_count(&self) -> usize {
        self.lock().map(|state| state.writes).unwrap_or(0)
    }

    /// Raw stored value, bypassing failure injection
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock()
            .ok()
            .and_then(|state| state.entries.get(key).cloned())
    }

    /// Seed a raw value, bypassing failure injection
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut state) = self.lock() {
            state.entries.insert(key.into(), value.into());
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> ExpenseResult<Option<String>> {
        let state = self.lock()?;
        if state.fail_reads {
            return Err(ExpenseError::Storage(format!("Failed to read {}", key)));
        }
        Ok(state.entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> ExpenseResult<()> {
        let mut state = self.lock()?;
        if state.fail_writes {
            return Err(ExpenseError::Persistence(format!("Failed to write {}", key)));
        }
        state.entries.insert(key.to_string(), value);
        state.writes += 1;
        Ok(())
    }

    async fn delete(&self, key: &str) -> ExpenseResult<()> {
        let mut state = self.lock()?;
        if state.fail_writes {
            return Err(ExpenseError::Persistence(format!("Failed to delete {}", key)));
        }
        state.entries.remove(key);
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_delete() {
        let store = MemoryKeyValueStore::new();

        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryKeyValueStore::new();
        let handle = store.clone();

        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(handle.raw("k").as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryKeyValueStore::new();
        store.insert_raw("k", "v");

        store.set_fail_reads(true);
        assert!(store.get("k").await.is_err());

        store.set_fail_writes(true);
        let err = store.set("k", "w".to_string()).await.unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(store.raw("k").as_deref(), Some("v"));
        assert_eq!(store.write_count(), 0);
    }
}
