//! Expense model
//!
//! An expense is a single recorded spending event. The `id` and `created_at`
//! fields are fixed at creation; everything else may be edited.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::category::Category;
use super::ids::ExpenseId;

/// Longest description accepted, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Amount spent (always positive)
    pub amount: Amount,

    /// Expense category
    pub category: Category,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// The day the expense occurred
    #[serde(with = "date_format")]
    pub date: NaiveDate,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a fresh id, stamped with the current time
    pub fn new(input: NewExpense) -> Self {
        Self::new_at(input, Utc::now())
    }

    /// Create a new expense with an explicit creation timestamp
    pub fn new_at(input: NewExpense, created_at: DateTime<Utc>) -> Self {
        Self {
            id: ExpenseId::new(),
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date,
            created_at,
        }
    }

    /// Apply a partial update; unset fields keep their values
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(date) = update.date {
            self.date = date;
        }
    }

    /// Label used where a description is optional (falls back to the category)
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            self.category.name()
        } else {
            &self.description
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(self.amount, &self.description)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.label(),
            self.amount
        )
    }
}

/// Fields supplied by the user when recording an expense
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Amount,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn new(
        amount: Amount,
        category: Category,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
            date,
        }
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        validate_fields(self.amount, &self.description)
    }
}

/// A partial replacement of an expense's editable fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub amount: Option<Amount>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Amount) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}

fn validate_fields(amount: Amount, description: &str) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }

    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ExpenseValidationError::DescriptionTooLong(len));
    }

    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Amount),
    DescriptionTooLong(usize),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description must be at most {} characters (got {})",
                MAX_DESCRIPTION_LEN, len
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Calendar dates are written as `YYYY-MM-DD`. Reading also accepts full
/// RFC 3339 timestamps, taking the calendar day in the local time zone.
mod date_format {
    use chrono::{DateTime, Local, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    }
}
