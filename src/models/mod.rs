//! Core data models for the expense tracker
//!
//! This module contains the data structures that represent the expense
//! domain: the expense record, its identifier, amount and category.

pub mod amount;
pub mod category;
pub mod expense;
pub mod ids;

pub use amount::{Amount, AmountParseError};
pub use category::{Category, CategoryParseError};
pub use expense::{Expense, ExpenseUpdate, ExpenseValidationError, NewExpense, MAX_DESCRIPTION_LEN};
pub use ids::ExpenseId;
