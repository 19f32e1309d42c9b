//! Expense Tracker - personal expense recording and spending statistics
//!
//! This library provides the core functionality for the expense tracker: a
//! persisted list of expenses, pure statistics over that list, and the
//! terminal front end that drives both.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, amounts, categories)
//! - `storage`: Key-value persistence of the expense list
//! - `services`: The in-memory expense store and its change notifications
//! - `reports`: Statistics derived from a list of expenses
//! - `audit`: Audit logging system
//! - `cli`: Command handlers and input validation
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::services::ExpenseStore;
//! use expense_tracker::storage::FileKeyValueStore;
//!
//! let mut store = ExpenseStore::open(FileKeyValueStore::new(paths.data_dir())).await;
//! let expense = store.add(input).await?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
