//! Amount type for representing expense values
//!
//! Wraps a `Decimal` so sums over many expenses stay exact. Amounts are stored
//! as plain JSON numbers to stay compatible with existing data files.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A currency amount in whole units (e.g. 12.50)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Amount {
    /// Create an amount from a decimal value
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create an amount from a whole number of units
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Lossy conversion for charting and percentage math
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Share of `total` this amount represents, in percent
    ///
    /// Returns 0 when `total` is zero.
    pub fn percentage_of(&self, total: Amount) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        (self.0 * Decimal::ONE_HUNDRED / total.0)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Divide evenly across `count` items, zero when `count` is 0
    pub fn average_over(&self, count: usize) -> Amount {
        if count == 0 {
            return Amount::zero();
        }
        Self(self.0 / Decimal::from(count))
    }

    /// Parse an amount from user input
    ///
    /// Accepts formats: "10.50", "10", "$10.50", "₹10.50"
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        let digits = trimmed.trim_start_matches(['$', '₹', '€', '£']).trim();

        if digits.is_empty() {
            return Err(AmountParseError::Empty);
        }

        Decimal::from_str(digits)
            .map(Self)
            .map_err(|_| AmountParseError::InvalidFormat(trimmed.to_string()))
    }

    /// Format with a currency symbol, rounded to two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{:.2}", symbol, self.0.round_dp(2))
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> std::iter::Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + *a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountParseError {
    #[error("Amount is required")]
    Empty,
    #[error("Amount must be a number: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(dec!(10.5)).to_string(), "10.50");
        assert_eq!(Amount::zero().to_string(), "0.00");
        assert_eq!(Amount::new(dec!(0.005)).to_string(), "0.00");
        assert_eq!(Amount::from_units(250).format_with_symbol("₹"), "₹250.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Amount::parse("10.50").unwrap(), Amount::new(dec!(10.50)));
        assert_eq!(Amount::parse("$10.50").unwrap(), Amount::new(dec!(10.50)));
        assert_eq!(Amount::parse(" ₹250 ").unwrap(), Amount::from_units(250));
        assert_eq!(Amount::parse(""), Err(AmountParseError::Empty));
        assert!(matches!(
            Amount::parse("ten"),
            Err(AmountParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_sum_is_exact() {
        let amounts = vec![
            Amount::new(dec!(0.1)),
            Amount::new(dec!(0.2)),
            Amount::new(dec!(0.3)),
        ];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total, Amount::new(dec!(0.6)));
    }

    #[test]
    fn test_percentage_of() {
        let total = Amount::from_units(150);
        let share = Amount::from_units(100).percentage_of(total);
        assert!((share - 66.6667).abs() < 0.001);
        assert_eq!(Amount::from_units(5).percentage_of(Amount::zero()), 0.0);
    }

    #[test]
    fn test_average_over() {
        assert_eq!(
            Amount::from_units(300).average_over(4),
            Amount::new(dec!(75))
        );
        assert_eq!(Amount::from_units(300).average_over(0), Amount::zero());
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Amount::new(dec!(12.5))).unwrap();
        assert_eq!(json, "12.5");

        let from_int: Amount = serde_json::from_str("250").unwrap();
        assert_eq!(from_int, Amount::from_units(250));

        let from_float: Amount = serde_json::from_str("99.75").unwrap();
        assert_eq!(from_float, Amount::new(dec!(99.75)));
    }
}
