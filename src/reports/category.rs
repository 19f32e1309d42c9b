//! Category breakdown
//!
//! Groups expenses by category and ranks the groups by total spending.

use crate::models::{Amount, Category, Expense};

/// Number of categories shown when no limit is given
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Spending within one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category
    pub category: Category,
    /// Sum of amounts in this category
    pub total: Amount,
    /// Number of expenses in this category
    pub count: usize,
    /// Share of the grand total, in percent (0 when the grand total is 0)
    pub percentage: f64,
}

/// Totals per category, largest first
///
/// Only categories that occur in `expenses` appear. Categories with equal
/// totals keep the order in which they were first seen.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let grand_total: Amount = expenses.iter().map(|e| e.amount).sum();

    let mut groups: Vec<(Category, Amount, usize)> = Vec::new();
    for expense in expenses {
        match groups.iter_mut().find(|(c, _, _)| *c == expense.category) {
            Some((_, total, count)) => {
                *total += expense.amount;
                *count += 1;
            }
            None => groups.push((expense.category, expense.amount, 1)),
        }
    }

    let mut totals: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, total, count)| CategoryTotal {
            category,
            total,
            count,
            percentage: total.percentage_of(grand_total),
        })
        .collect();

    // sort_by is stable, which keeps first-seen order for ties
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// The `limit` highest-spending categories
pub fn top_categories(expenses: &[Expense], limit: usize) -> Vec<CategoryTotal> {
    let mut totals = category_totals(expenses);
    totals.truncate(limit);
    totals
}
