//! Expense repository
//!
//! The whole expense list is stored as one JSON array under a single
//! namespaced key and is rewritten in full on every save.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

use super::kv::KeyValueStore;

/// Key under which the expense list is stored
pub const EXPENSES_KEY: &str = "@ExpenseTracker:expenses";

/// Reads and writes the persisted expense list
#[derive(Debug, Clone)]
pub struct ExpenseRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ExpenseRepository<S> {
    /// Create a repository using the default key
    pub fn new(store: S) -> Self {
        Self::with_key(store, EXPENSES_KEY)
    }

    /// Create a repository using a custom key
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load all persisted expenses; an absent key yields an empty list
    pub async fn load_expenses(&self) -> ExpenseResult<Vec<Expense>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw)
            .map_err(|e| ExpenseError::Json(format!("Failed to parse {}: {}", self.key, e)))
    }

    /// Replace the persisted list with `expenses`
    pub async fn save_expenses(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        let json = serde_json::to_string(expenses).map_err(|e| {
            ExpenseError::Persistence(format!("Failed to serialize expenses: {}", e))
        })?;

        self.store.set(&self.key, json).await
    }

    /// Remove the persisted list entirely
    pub async fn clear_expenses(&self) -> ExpenseResult<()> {
        self.store.delete(&self.key).await
    }
}
