//! Expense display formatting
//!
//! Renders expense lists as tables and single expenses as detail blocks.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Amount, Expense};

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table followed by a total line
pub fn format_expense_table(expenses: &[&Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses yet. Start tracking with 'expense add'.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.short(),
        date: e.date.format(&settings.date_format).to_string(),
        category: e.category.to_string(),
        description: truncate(&e.description, 40),
        amount: e.amount.format_with_symbol(&settings.currency_symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());

    let total: Amount = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n\n{} expenses, total {}\n",
        table,
        expenses.len(),
        total.format_with_symbol(&settings.currency_symbol)
    )
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Date:        {}\n",
        expense.date.format(&settings.date_format)
    ));

    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
