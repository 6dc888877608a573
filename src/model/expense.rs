use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, MonthKey};
use crate::Result;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The date format used for user input and CSV files.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Categories offered to the user when adding an expense. Any non-empty category is accepted.
pub const SUGGESTED_CATEGORIES: [&str; 5] = ["Food", "Travel", "Shopping", "Bills", "Others"];

/// A single expense.
///
/// An expense has no identifier. It is addressed by its position in an `ExpenseStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    date: NaiveDate,
    category: String,
    amount: Amount,
    description: String,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Amount,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    /// Builds an expense from text typed by a user.
    ///
    /// Every field is trimmed. `date`, `category` and `amount` must be non-empty, `date` must be
    /// a valid `YYYY-MM-DD` date and `amount` must be a number.
    ///
    /// # Errors
    /// - Returns an error of type `ErrorType::Validation` if any of the above does not hold.
    pub fn parse(date: &str, category: &str, amount: &str, description: &str) -> Result<Self> {
        parse_input(date, category, amount, description).pub_result(ErrorType::Validation)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The `YYYY-MM` month this expense falls in.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::of(self.date)
    }
}

fn parse_input(date: &str, category: &str, amount: &str, description: &str) -> anyhow::Result<Expense> {
    let (date, category, amount) = (date.trim(), category.trim(), amount.trim());
    if date.is_empty() || amount.is_empty() || category.is_empty() {
        bail!("Please enter the required fields: date, category and amount");
    }
    let date = parse_date(date)?;
    let amount = Amount::from_str(amount).context("Invalid number for amount")?;
    Ok(Expense::new(date, category, amount, description.trim()))
}

/// Parses a `YYYY-MM-DD` date.
pub(crate) fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{s}', use yyyy-mm-dd"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_valid() {
        let expense = Expense::parse(" 2024-01-15 ", "Food", " 12.5 ", "  lunch ").unwrap();
        assert_eq!(expense.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(expense.category(), "Food");
        assert_eq!(expense.amount().value(), Decimal::from_str("12.5").unwrap());
        assert_eq!(expense.description(), "lunch");
        assert_eq!(expense.month_key().to_string(), "2024-01");
    }

    #[test]
    fn test_parse_missing_required_fields() {
        for (date, category, amount) in [
            ("", "Food", "1"),
            ("2024-01-01", "", "1"),
            ("2024-01-01", "Food", "  "),
        ] {
            let err = Expense::parse(date, category, amount, "").unwrap_err();
            assert_eq!(err.error_type(), ErrorType::Validation);
            assert!(err.to_string().contains("required fields"));
        }
    }

    #[test]
    fn test_parse_bad_date() {
        let err = Expense::parse("2024-02-30", "Food", "1", "").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(err.to_string().contains("Invalid date"));

        let err = Expense::parse("15/01/2024", "Food", "1", "").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
    }

    #[test]
    fn test_parse_bad_amount() {
        let err = Expense::parse("2024-01-01", "Food", "ten", "").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Validation);
        assert!(err.to_string().contains("Invalid number for amount"));
    }

    #[test]
    fn test_parse_accepts_any_category() {
        let expense = Expense::parse("2024-01-01", "Pets", "-3", "").unwrap();
        assert_eq!(expense.category(), "Pets");
        assert!(expense.amount().is_negative());
    }
}
