//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and statistics for terminal
//! display. Rounding to two decimals happens here, never in the reports.

pub mod expense;
pub mod report;
pub mod statistics;

pub use expense::{format_expense_details, format_expense_table};
pub use statistics::{
    format_category_breakdown, format_monthly_trend, format_statistics, format_summary,
};
