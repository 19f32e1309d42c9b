//! Expense identifier
//!
//! Ids are opaque strings. New ids are random UUIDs, but any non-empty string
//! read back from storage is accepted so older records keep their identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "exp-";

/// Unique identifier of an expense, assigned once at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form used in listings ("exp-" plus the first 8 characters)
    pub fn short(&self) -> String {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        format!("{}{}", DISPLAY_PREFIX, &self.0[..end])
    }

    /// Check whether user input refers to this id
    ///
    /// Accepts the full id, or a prefix of it, with or without the `exp-`
    /// display prefix.
    pub fn matches(&self, input: &str) -> bool {
        let input = input.trim();
        let input = input.strip_prefix(DISPLAY_PREFIX).unwrap_or(input);
        !input.is_empty() && self.0.starts_with(input)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExpenseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
