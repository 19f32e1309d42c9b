//! Monthly spending trend
//!
//! Buckets expenses into consecutive calendar months ending at the current
//! month, oldest first.

use chrono::{Datelike, Months, NaiveDate};

use crate::models::{Amount, Expense};

use super::period::month_bounds;

/// Number of months shown in the trend when not configured
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Spending within one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyData {
    /// Short month name ("Jan")
    pub month: String,
    /// Calendar year of the bucket
    pub year: i32,
    /// Month number, 1-12
    pub month_number: u32,
    /// Sum of amounts dated in this month
    pub total: Amount,
    /// Number of expenses dated in this month
    pub count: usize,
}

/// Totals for the `month_count` months ending with the month of `today`
///
/// Always returns exactly `month_count` buckets, even for empty input.
pub fn monthly_trend(
    expenses: &[Expense],
    month_count: u32,
    today: NaiveDate,
) -> Vec<MonthlyData> {
    let (current_start, _) = month_bounds(today);

    (0..month_count)
        .rev()
        .map(|back| {
            let month_start = current_start
                .checked_sub_months(Months::new(back))
                .unwrap_or(NaiveDate::MIN);
            let (start, end) = month_bounds(month_start);

            let (total, count) = expenses
                .iter()
                .filter(|e| e.date >= start && e.date <= end)
                .fold((Amount::zero(), 0), |(total, count), e| {
                    (total + e.amount, count + 1)
                });

            MonthlyData {
                month: start.format("%b").to_string(),
                year: start.year(),
                month_number: start.month(),
                total,
                count,
            }
        })
        .collect()
}
