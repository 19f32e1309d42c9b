//! Audit entry data structures
//!
//! Defines the structure of audit log entries and the operations that can be
//! recorded against an expense.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Expense was recorded
    Create,
    /// Expense was edited
    Update,
    /// Expense was removed
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
///
/// Records one committed change to an expense with optional before/after
/// snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected expense
    pub expense_id: String,

    /// Human-readable label (description, or category when blank)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Snapshot before the operation (updates/deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    /// Snapshot after the operation (creates/updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable change summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a newly recorded expense
    pub fn create(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            expense_id: expense.id.to_string(),
            label: Some(expense.label().to_string()),
            before: None,
            after: serde_json::to_value(expense).ok(),
            diff_summary: None,
        }
    }

    /// Entry for an edited expense
    pub fn update(before: &Expense, after: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            expense_id: after.id.to_string(),
            label: Some(after.label().to_string()),
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            diff_summary: describe_changes(before, after),
        }
    }

    /// Entry for a removed expense
    pub fn delete(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            expense_id: expense.id.to_string(),
            label: Some(expense.label().to_string()),
            before: serde_json::to_value(expense).ok(),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} Expense {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id
        );

        if let Some(label) = &self.label {
            output.push_str(&format!(" ({})", label));
        }

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

/// Summarize field changes as `field: old -> new`, joined with commas
fn describe_changes(before: &Expense, after: &Expense) -> Option<String> {
    let mut changes = Vec::new();

    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.description != after.description {
        changes.push(format!(
            "description: {:?} -> {:?}",
            before.description, after.description
        ));
    }
    if before.date != after.date {
        changes.push(format!("date: {} -> {}", before.date, after.date));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Category, ExpenseUpdate, NewExpense};
    use chrono::NaiveDate;

    fn sample() -> Expense {
        Expense::new(NewExpense::new(
            Amount::from_units(250),
            Category::Food,
            "Lunch",
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        ))
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_create_entry() {
        let expense = sample();
        let entry = AuditEntry::create(&expense);

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.expense_id, expense.id.to_string());
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry_summarizes_changes() {
        let before = sample();
        let mut after = before.clone();
        after.apply(
            &ExpenseUpdate::new()
                .amount(Amount::from_units(300))
                .category(Category::Entertainment),
        );

        let entry = AuditEntry::update(&before, &after);
        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("amount: 250.00 -> 300.00, category: Food -> Entertainment")
        );
    }

    #[test]
    fn test_update_without_changes_has_no_summary() {
        let expense = sample();
        let entry = AuditEntry::update(&expense, &expense);
        assert!(entry.diff_summary.is_none());
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&sample());
        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(&sample());
        let formatted = entry.format_human_readable();
        assert!(formatted.contains("CREATE"));
        assert!(formatted.contains("Expense"));
        assert!(formatted.contains("Lunch"));
    }
}
