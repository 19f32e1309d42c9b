//! Spending summary
//!
//! Headline numbers shown above the charts: overall total and average, plus
//! the running total for the current month.

use chrono::NaiveDate;

use crate::models::{Amount, Expense};

use super::period::current_month_expenses;

/// Aggregate figures for a set of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    /// Sum of all amounts
    pub total: Amount,
    /// Number of expenses
    pub count: usize,
    /// Mean amount (0 when there are no expenses)
    pub average: Amount,
    /// Sum of amounts dated in the current month
    pub current_month_total: Amount,
    /// Number of expenses dated in the current month
    pub current_month_count: usize,
}

impl SpendingSummary {
    /// Summarize `expenses` relative to `today`
    pub fn generate(expenses: &[Expense], today: NaiveDate) -> Self {
        let total: Amount = expenses.iter().map(|e| e.amount).sum();
        let current = current_month_expenses(expenses, today);

        Self {
            total,
            count: expenses.len(),
            average: total.average_over(expenses.len()),
            current_month_total: current.iter().map(|e| e.amount).sum(),
            current_month_count: current.len(),
        }
    }
}
