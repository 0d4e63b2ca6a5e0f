//! Amounts

use std::{
    fmt::{self, Display, Formatter},
    iter::Sum,
};

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised when converting a decimal into an [`Amount`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// Amounts cannot be negative.
    #[error("amount {0} is negative")]
    Negative(Decimal),

    /// The value does not fit into minor units.
    #[error("amount {0} is out of range")]
    OutOfRange(Decimal),
}

/// A non-negative rupee amount held in paise.
///
/// On the wire amounts are JSON numbers in rupees (`200`, `22.5`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    /// Zero rupees.
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from paise.
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Create an amount from whole rupees.
    pub const fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(100))
    }

    /// Amount in paise.
    pub const fn to_minor_units(self) -> u64 {
        self.0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert a rupee decimal into an amount, rounding to the nearest paisa.
    ///
    /// # Errors
    ///
    /// Returns an [`AmountError`] when the value is negative or too large.
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }

        value
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|minor| minor.round())
            .and_then(|minor| minor.to_u64())
            .map(Self)
            .ok_or(AmountError::OutOfRange(value))
    }

    /// Rupee value as a decimal.
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0) / Decimal::ONE_HUNDRED
    }

    /// Add two amounts, saturating at the upper bound.
    #[must_use]
    pub const fn saturating_add(self, other: Amount) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtract `other`, never going below zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Amount) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiply by a quantity, saturating at the upper bound.
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Amount::saturating_add)
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match i64::try_from(self.0) {
            Ok(minor) => write!(f, "{}", Money::from_minor(minor, iso::INR)),
            Err(_) => write!(f, "₹{}", self.to_decimal()),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = rust_decimal::serde::float::deserialize(deserializer)?;

        Amount::from_decimal(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_decimal_rounds_to_paise() -> TestResult {
        let amount = Amount::from_decimal(Decimal::new(12_345, 3))?;

        assert_eq!(amount.to_minor_units(), 1_234);

        Ok(())
    }

    #[test]
    fn from_decimal_rejects_negative_values() {
        let result = Amount::from_decimal(Decimal::new(-100, 2));

        assert_eq!(result, Err(AmountError::Negative(Decimal::new(-100, 2))));
    }

    #[test]
    fn decodes_integer_and_fractional_json_numbers() -> TestResult {
        let whole: Amount = serde_json::from_value(json!(200))?;
        let fractional: Amount = serde_json::from_value(json!(22.5))?;

        assert_eq!(whole, Amount::from_major(200));
        assert_eq!(fractional, Amount::from_minor(2_250));

        Ok(())
    }

    #[test]
    fn decoding_a_negative_number_fails() {
        let result = serde_json::from_value::<Amount>(json!(-5));

        assert!(result.is_err(), "negative amounts must not decode");
    }

    #[test]
    fn encodes_as_rupees() -> TestResult {
        let encoded = serde_json::to_value(Amount::from_minor(17_050))?;

        assert_eq!(encoded, json!(170.5));

        Ok(())
    }

    #[test]
    fn saturating_sub_never_goes_negative() {
        let total = Amount::from_major(20);

        assert_eq!(total.saturating_sub(Amount::from_major(30)), Amount::ZERO);
    }

    #[test]
    fn sum_adds_all_amounts() {
        let total: Amount = [Amount::from_major(1), Amount::from_minor(50)]
            .into_iter()
            .sum();

        assert_eq!(total, Amount::from_minor(150));
    }
}
