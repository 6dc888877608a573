use anyhow::{bail, Context};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A calendar month, written as `YYYY-MM`.
///
/// Ordering is chronological, which for four-digit years is the same as the lexicographic order
/// of the written form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month that `date` falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .with_context(|| format!("Expected a month in the form YYYY-MM, got '{s}'"))?;
        let digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(year, 4) || !digits(month, 2) {
            bail!("Expected a month in the form YYYY-MM, got '{s}'");
        }
        let year: i32 = year
            .parse()
            .with_context(|| format!("Invalid year in month '{s}'"))?;
        let month: u32 = month
            .parse()
            .with_context(|| format!("Invalid month in month '{s}'"))?;
        MonthKey::new(year, month).with_context(|| format!("Month out of range in '{s}'"))
    }
}

impl Serialize for MonthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MonthKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_date_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(MonthKey::of(date).to_string(), "2024-03");
    }

    #[test]
    fn test_parse() {
        let key = MonthKey::from_str("2024-11").unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 11);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(MonthKey::from_str("2024-13").is_err());
        assert!(MonthKey::from_str("2024-00").is_err());
        assert!(MonthKey::from_str("2024-1").is_err());
        assert!(MonthKey::from_str("202401").is_err());
        assert!(MonthKey::from_str("all").is_err());
    }

    #[test]
    fn test_order_matches_written_order() {
        let a = MonthKey::from_str("2023-12").unwrap();
        let b = MonthKey::from_str("2024-01").unwrap();
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }
}
