//! Expense categories
//!
//! The set of categories is closed; every expense belongs to exactly one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of an expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Utilities,
    Medical,
    Education,
    Entertainment,
    Other,
}

impl Category {
    /// Every category, in picker order
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Medical,
        Category::Education,
        Category::Entertainment,
        Category::Other,
    ];

    /// Display name, also the stored form
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Utilities => "Utilities",
            Self::Medical => "Medical",
            Self::Education => "Education",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Error returned when text does not name a known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}' (expected one of: Food, Transport, Utilities, Medical, Education, Entertainment, Other)")]
pub struct CategoryParseError(pub String);
