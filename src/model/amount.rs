//! Amount type for handling monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal`. The value keeps whatever
//! precision it was parsed with; it is rounded to two decimal places only when it is written.
//!
//! Parsed amounts must be smaller than one quadrillion in magnitude. Sums of any realistic number
//! of such amounts stay far inside the range of `Decimal`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// The number of decimal places an amount is written with.
const DECIMAL_PLACES: u32 = 2;

/// Parsed amounts must be strictly smaller than this in magnitude.
const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

/// Represents a money amount.
///
/// `Display` writes exactly two decimal places with `.` as the separator and no thousands
/// separators, which is the form used in CSV files. Use `Amount::pretty` for something a human
/// would want to read.
///
/// # Examples
///
/// ```
/// # use expense_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("12.5").unwrap();
/// assert_eq!(amount.to_string(), "12.50");
/// assert_eq!(Amount::from_str("-1234.565").unwrap().pretty("$"), "-$1,234.57");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the value rounded, half away from zero, to the two decimal places it is written
    /// with.
    pub fn rounded(&self) -> Decimal {
        self.value
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value.is_sign_negative()
    }

    /// Formats the amount for people: a currency `symbol` after the sign and commas as thousands
    /// separators, e.g. `-₹60,000.00`.
    pub fn pretty(&self, symbol: &str) -> String {
        let sign = if self.rounded().is_sign_negative() && !self.rounded().is_zero() {
            "-"
        } else {
            ""
        };
        let num = self.rounded().abs().to_f64().unwrap_or_default();
        format!("{sign}{symbol}{}", format_num::format_num!(",.2", num))
    }
}

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError {
    input: String,
    reason: Reason,
}

#[derive(Debug)]
enum Reason {
    NotANumber(rust_decimal::Error),
    TooLarge,
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.reason, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Reason::NotANumber(e) => write!(f, "'{}' is not a number: {e}", self.input),
            Reason::TooLarge => write!(
                f,
                "'{}' is too large, amounts must be smaller than {MAX_MAGNITUDE} in magnitude",
                self.input
            ),
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.reason {
            Reason::NotANumber(e) => Some(e),
            Reason::TooLarge => None,
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let parsed = if unsigned.contains(['e', 'E']) {
            Decimal::from_scientific(unsigned)
        } else {
            Decimal::from_str(unsigned)
        };
        let value = parsed.map_err(|e| AmountError {
            input: s.to_string(),
            reason: Reason::NotANumber(e),
        })?;
        if value.abs() >= Decimal::from(MAX_MAGNITUDE) {
            return Err(AmountError {
                input: s.to_string(),
                reason: Reason::TooLarge,
            });
        }
        Ok(Amount::new(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.rounded();
        // Avoid writing "-0.00" for tiny negative values.
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        write!(f, "{rounded:.prec$}", prec = DECIMAL_PLACES as usize)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount::new(self.value + rhs.value)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("50.25").unwrap();
        assert_eq!(amount.value(), dec("50.25"));
    }

    #[test]
    fn test_parse_negative() {
        let amount = Amount::from_str("-50").unwrap();
        assert_eq!(amount.value(), dec("-50"));
        assert!(amount.is_negative());
    }

    #[test]
    fn test_parse_whitespace_and_plus() {
        let amount = Amount::from_str("  +7.5 ").unwrap();
        assert_eq!(amount.value(), dec("7.5"));
    }

    #[test]
    fn test_parse_scientific() {
        let amount = Amount::from_str("1.5e2").unwrap();
        assert_eq!(amount.value(), dec("150"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Amount::from_str("abc").unwrap_err();
        assert!(err.to_string().contains("'abc' is not a number"));
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("1,000").is_err());
    }

    #[test]
    fn test_display_two_places() {
        assert_eq!(Amount::from_str("10").unwrap().to_string(), "10.00");
        assert_eq!(Amount::from_str("0.1").unwrap().to_string(), "0.10");
        assert_eq!(Amount::from_str("-3.456").unwrap().to_string(), "-3.46");
        assert_eq!(Amount::from_str("2.005").unwrap().to_string(), "2.01");
        assert_eq!(Amount::from_str("123456.789").unwrap().to_string(), "123456.79");
    }

    #[test]
    fn test_parse_rejects_huge_magnitude() {
        let err = Amount::from_str("79228162514264337593543950335").unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(Amount::from_str("-1000000000000000").is_err());
        assert!(Amount::from_str("1e15").is_err());
        let largest = Amount::from_str("999999999999999.99").unwrap();
        assert_eq!(largest.to_string(), "999999999999999.99");
    }

    #[test]
    fn test_display_pads_large_values() {
        let amount = Amount::new(Decimal::MAX);
        assert_eq!(amount.to_string(), "79228162514264337593543950335.00");
        let amount = Amount::from_str("123456789012345").unwrap();
        assert_eq!(amount.to_string(), "123456789012345.00");
    }

    #[test]
    fn test_sum_of_largest_amounts() {
        let largest = Amount::from_str("-999999999999999.99").unwrap();
        let total: Amount = std::iter::repeat(largest).take(10_000).sum();
        assert_eq!(total.to_string(), "-9999999999999999900.00");
    }

    #[test]
    fn test_display_no_negative_zero() {
        assert_eq!(Amount::from_str("-0.001").unwrap().to_string(), "0.00");
    }

    #[test]
    fn test_pretty() {
        let amount = Amount::from_str("60000").unwrap();
        assert_eq!(amount.pretty("₹"), "₹60,000.00");
        let amount = Amount::from_str("-42.1").unwrap();
        assert_eq!(amount.pretty("$"), "-$42.10");
        assert_eq!(Amount::ZERO.pretty(""), "0.00");
    }

    #[test]
    fn test_sum() {
        let amounts = ["10", "5", "20.75"].map(|s| Amount::from_str(s).unwrap());
        let total: Amount = amounts.iter().sum();
        assert_eq!(total.value(), dec("35.75"));
        let empty: Amount = Vec::<Amount>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_serialize() {
        let amount = Amount::from_str("50").unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"50.00\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }
}
