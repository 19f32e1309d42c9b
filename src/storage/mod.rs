//! Storage layer for the expense tracker
//!
//! Provides the asynchronous key-value boundary, a file-backed implementation
//! with atomic writes, an in-memory implementation, and the repository that
//! maps the expense list onto a single key.

pub mod expenses;
pub mod file_io;
pub mod kv;
pub mod memory;

pub use expenses::{ExpenseRepository, EXPENSES_KEY};
pub use file_io::FileKeyValueStore;
pub use kv::KeyValueStore;
pub use memory::MemoryKeyValueStore;
