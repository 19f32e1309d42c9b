//! Business logic layer
//!
//! The expense store is the single source of truth consumed by every
//! front end.

pub mod expense;

pub use expense::{ExpenseFilter, ExpenseStore, StoreSnapshot};
