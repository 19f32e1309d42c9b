//! Statistics display formatting
//!
//! Text renditions of the statistics screen: headline summary, category
//! breakdown and a monthly bar chart.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::reports::{CategoryTotal, MonthlyData, SpendingSummary};

use super::report::{format_bar, format_percentage, separator};

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "%")]
    percentage: String,
}

/// Format the headline figures
pub fn format_summary(summary: &SpendingSummary, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    let mut output = String::new();

    output.push_str(&format!(
        "Total Spent:   {}\n",
        summary.total.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Expenses:      {}\n", summary.count));
    output.push_str(&format!(
        "Average:       {}\n",
        summary.average.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "This Month:    {} ({} expenses)\n",
        summary.current_month_total.format_with_symbol(symbol),
        summary.current_month_count
    ));

    output
}

/// Format the category breakdown as a table
pub fn format_category_breakdown(totals: &[CategoryTotal], settings: &Settings) -> String {
    if totals.is_empty() {
        return "No expenses to break down.\n".to_string();
    }

    let rows = totals.iter().map(|t| CategoryRow {
        category: t.category.to_string(),
        amount: t.total.format_with_symbol(&settings.currency_symbol),
        count: t.count,
        percentage: format_percentage(t.percentage),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format the monthly trend as horizontal bars, oldest month first
pub fn format_monthly_trend(months: &[MonthlyData], settings: &Settings) -> String {
    let max = months
        .iter()
        .map(|m| m.total.to_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for month in months {
        output.push_str(&format!(
            "{} {} {} {:>12} ({})\n",
            month.month,
            month.year,
            format_bar(month.total.to_f64(), max, BAR_WIDTH),
            month.total.format_with_symbol(&settings.currency_symbol),
            month.count
        ));
    }

    output
}

/// Format the full statistics report
pub fn format_statistics(
    summary: &SpendingSummary,
    breakdown: &[CategoryTotal],
    trend: &[MonthlyData],
    settings: &Settings,
) -> String {
    let mut output = String::new();

    output.push_str("Statistics\n");
    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format_summary(summary, settings));

    output.push_str("\nTop Categories\n");
    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format_category_breakdown(breakdown, settings));

    output.push_str(&format!("\nLast {} Months\n", trend.len()));
    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format_monthly_trend(trend, settings));

    output
}
