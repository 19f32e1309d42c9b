//! Parsing of raw command line input
//!
//! Turns user-supplied strings into model values, reporting problems as
//! `ExpenseError::Validation` with a message fit to show the user. Rules on
//! the resulting values (positive amount, description length) are checked by
//! the model's `validate`.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, Category, NewExpense};

/// Parse a required numeric amount
pub fn parse_amount(input: &str) -> ExpenseResult<Amount> {
    if input.trim().is_empty() {
        return Err(ExpenseError::Validation("Please enter an amount".into()));
    }

    Amount::parse(input)
        .map_err(|_| ExpenseError::Validation("Please enter a valid number".into()))
}

/// Trim a description
pub fn parse_description(input: &str) -> String {
    input.trim().to_string()
}

/// Parse a category name, case-insensitively
pub fn parse_category(input: &str) -> ExpenseResult<Category> {
    input.parse::<Category>().map_err(|_| {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        ExpenseError::Validation(format!(
            "Unknown category '{}'. Choose one of: {}",
            input.trim(),
            names.join(", ")
        ))
    })
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD",
            input.trim()
        ))
    })
}

/// Parse and validate the fields of a new expense
pub fn parse_new_expense(
    amount: &str,
    category: &str,
    description: &str,
    date: Option<&str>,
    today: NaiveDate,
) -> ExpenseResult<NewExpense> {
    let input = NewExpense::new(
        parse_amount(amount)?,
        parse_category(category)?,
        parse_description(description),
        date.map(parse_date).transpose()?.unwrap_or(today),
    );

    input.validate()?;
    Ok(input)
}
