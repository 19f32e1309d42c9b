//! Date window filters

use chrono::{Datelike, Months, NaiveDate};

use crate::models::Expense;

/// First and last day of the calendar month containing `date`
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (start, end)
}

/// Expenses dated within `[start, end]`, in input order
///
/// An inverted range (`start > end`) matches nothing.
pub fn filter_by_date_range(
    expenses: &[Expense],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Expense> {
    if start > end {
        return Vec::new();
    }

    expenses
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .cloned()
        .collect()
}

/// Expenses dated in the calendar month of `today`, in input order
pub fn current_month_expenses(expenses: &[Expense], today: NaiveDate) -> Vec<Expense> {
    let (start, end) = month_bounds(today);
    filter_by_date_range(expenses, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Category, NewExpense};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn on(date: NaiveDate, amount: i64) -> Expense {
        Expense::new(NewExpense::new(
            Amount::from_units(amount),
            Category::Other,
            "",
            date,
        ))
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(d(2025, 1, 15)), (d(2025, 1, 1), d(2025, 1, 31)));
        assert_eq!(month_bounds(d(2024, 2, 29)), (d(2024, 2, 1), d(2024, 2, 29)));
        assert_eq!(month_bounds(d(2025, 12, 1)), (d(2025, 12, 1), d(2025, 12, 31)));
    }

    #[test]
    fn test_filter_is_inclusive() {
        let expenses = vec![
            on(d(2025, 1, 10), 1),
            on(d(2025, 1, 15), 2),
            on(d(2025, 1, 20), 3),
            on(d(2025, 1, 21), 4),
        ];

        let hits = filter_by_date_range(&expenses, d(2025, 1, 10), d(2025, 1, 20));
        let amounts: Vec<_> = hits.iter().map(|e| e.amount).collect();
        assert_eq!(
            amounts,
            vec![
                Amount::from_units(1),
                Amount::from_units(2),
                Amount::from_units(3)
            ]
        );
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let expenses = vec![on(d(2025, 1, 10), 1), on(d(2025, 1, 15), 2)];
        assert!(filter_by_date_range(&expenses, d(2025, 1, 20), d(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_current_month() {
        let expenses = vec![
            on(d(2025, 2, 28), 1),
            on(d(2025, 3, 1), 2),
            on(d(2025, 3, 31), 3),
            on(d(2025, 4, 1), 4),
            on(d(2024, 3, 15), 5),
        ];

        let march = current_month_expenses(&expenses, d(2025, 3, 14));
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].amount, Amount::from_units(2));
        assert_eq!(march[1].amount, Amount::from_units(3));

        assert!(current_month_expenses(&[], d(2025, 3, 14)).is_empty());
    }
}
