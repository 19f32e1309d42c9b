//! Expense store
//!
//! Holds the authoritative list of expenses and keeps it in step with
//! durable storage. Every mutation rewrites the full list; the in-memory
//! change is only kept once that write has succeeded.
//!
//! Mutating methods take `&mut self`, so one store cannot interleave two
//! mutations. Callers that share a store across tasks wrap it themselves
//! (for example in `Arc<tokio::sync::Mutex<_>>`).

use chrono::NaiveDate;
use tokio::sync::watch;

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, Category, Expense, ExpenseId, ExpenseUpdate, NewExpense};
use crate::storage::{ExpenseRepository, KeyValueStore};

/// State published to subscribers after every committed change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub expenses: Vec<Expense>,
    pub loading: bool,
}

/// Options for searching expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Only this category
    pub category: Option<Category>,
    /// Dated on or after
    pub start_date: Option<NaiveDate>,
    /// Dated on or before
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the description or category name
    pub text: Option<String>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by inclusive date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Filter by text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Limit the number of results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check whether an expense passes every set criterion
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if expense.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if expense.date > end {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty()
                && !expense.description.to_lowercase().contains(&needle)
                && !expense.category.name().to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Authoritative, persisted collection of expenses
pub struct ExpenseStore<S> {
    repository: ExpenseRepository<S>,
    expenses: Vec<Expense>,
    loading: bool,
    audit: Option<AuditLogger>,
    changes: watch::Sender<StoreSnapshot>,
}

impl<S: KeyValueStore> ExpenseStore<S> {
    /// Create an unloaded store over `store` using the default key
    pub fn new(store: S) -> Self {
        Self::with_repository(ExpenseRepository::new(store))
    }

    /// Create an unloaded store over an existing repository
    pub fn with_repository(repository: ExpenseRepository<S>) -> Self {
        let (changes, _) = watch::channel(StoreSnapshot {
            expenses: Vec::new(),
            loading: true,
        });

        Self {
            repository,
            expenses: Vec::new(),
            loading: true,
            audit: None,
            changes,
        }
    }

    /// Record every committed change in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// Create a store and load it
    pub async fn open(store: S) -> Self {
        let mut expense_store = Self::new(store);
        expense_store.load().await;
        expense_store
    }

    /// Load the persisted list, replacing whatever is in memory
    ///
    /// Never fails: if the data cannot be read or parsed the condition is
    /// logged and the store starts empty.
    pub async fn load(&mut self) {
        self.loading = true;
        self.publish();

        self.expenses = match self.repository.load_expenses().await {
            Ok(expenses) => expenses,
            Err(e) => {
                log::warn!("Failed to load expenses, starting with an empty list: {}", e);
                Vec::new()
            }
        };

        self.loading = false;
        self.publish();
    }

    /// Record a new expense
    ///
    /// The expense gets a fresh id and creation time. On a failed write the
    /// store is left exactly as it was.
    pub async fn add(&mut self, input: NewExpense) -> ExpenseResult<Expense> {
        let expense = Expense::new(input);

        self.expenses.push(expense.clone());
        if let Err(e) = self.persist().await {
            self.expenses.pop();
            return Err(e);
        }

        self.publish();
        self.record(AuditEntry::create(&expense)).await;
        Ok(expense)
    }

    /// Merge `update` into the expense with `id`
    ///
    /// Returns `Ok(None)` without writing anything when `id` is unknown.
    pub async fn update(
        &mut self,
        id: &ExpenseId,
        update: ExpenseUpdate,
    ) -> ExpenseResult<Option<Expense>> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };

        let before = self.expenses[index].clone();
        self.expenses[index].apply(&update);
        let after = self.expenses[index].clone();

        if let Err(e) = self.persist().await {
            self.expenses[index] = before;
            return Err(e);
        }

        self.publish();
        self.record(AuditEntry::update(&before, &after)).await;
        Ok(Some(after))
    }

    /// Remove the expense with `id`
    ///
    /// Returns `Ok(false)` without writing anything when `id` is unknown.
    pub async fn remove(&mut self, id: &ExpenseId) -> ExpenseResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.expenses.remove(index);
        if let Err(e) = self.persist().await {
            self.expenses.insert(index, removed);
            return Err(e);
        }

        self.publish();
        self.record(AuditEntry::delete(&removed)).await;
        Ok(true)
    }

    /// Delete every expense, including the persisted list
    pub async fn clear(&mut self) -> ExpenseResult<usize> {
        self.repository
            .clear_expenses()
            .await
            .map_err(into_persistence)?;

        let removed = std::mem::take(&mut self.expenses);
        self.publish();
        for expense in &removed {
            self.record(AuditEntry::delete(expense)).await;
        }
        Ok(removed.len())
    }

    /// Current expenses, in insertion order
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Look up an expense by id
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Expenses whose id matches user input (full id or prefix)
    pub fn find_by_prefix(&self, input: &str) -> Vec<&Expense> {
        self.expenses.iter().filter(|e| e.id.matches(input)).collect()
    }

    /// True until the first load has completed, and while a load is running
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Sum of every expense amount
    pub fn total_amount(&self) -> Amount {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Expenses in `category`, in insertion order
    pub fn by_category(&self, category: Category) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Expenses passing `filter`, in insertion order
    pub fn search(&self, filter: &ExpenseFilter) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| filter.matches(e))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Receive a snapshot after every committed change
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.changes.subscribe()
    }

    fn position(&self, id: &ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|e| &e.id == id)
    }

    async fn persist(&self) -> ExpenseResult<()> {
        self.repository
            .save_expenses(&self.expenses)
            .await
            .map_err(|e| {
                log::error!("Failed to save expenses: {}", e);
                into_persistence(e)
            })
    }

    fn publish(&self) {
        self.changes.send_replace(StoreSnapshot {
            expenses: self.expenses.clone(),
            loading: self.loading,
        });
    }

    async fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry).await {
                log::warn!("Failed to write audit entry: {}", e);
            }
        }
    }
}

fn into_persistence(err: ExpenseError) -> ExpenseError {
    match err {
        ExpenseError::Persistence(_) => err,
        other => ExpenseError::Persistence(other.to_string()),
    }
}
