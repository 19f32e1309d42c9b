//! Key-value persistence boundary
//!
//! The store only needs three operations on string values. Failures are
//! reported to the caller and never retried here.

use async_trait::async_trait;

use crate::error::ExpenseResult;

/// Durable asynchronous key-value storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> ExpenseResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> ExpenseResult<()>;

    /// Remove `key`; removing an absent key succeeds
    async fn delete(&self, key: &str) -> ExpenseResult<()>;
}
