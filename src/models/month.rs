//! Calendar month used to bucket attendance and payments.
//!
//! [`PayrollMonth`] is the `YYYY-MM` key of every summary and ledger.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A calendar month (`YYYY-MM`).
///
/// Ordering is chronological, so a `BTreeMap<PayrollMonth, _>` iterates
/// oldest month first.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::PayrollMonth;
/// use chrono::NaiveDate;
///
/// let march: PayrollMonth = "2024-03".parse().unwrap();
///
/// assert!(march.contains_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
/// assert!(!march.contains_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
/// assert_eq!(march.next().to_string(), "2024-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayrollMonth {
    year: i32,
    month: u32,
}

impl PayrollMonth {
    /// Creates a month, returning `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month number (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Checks whether a date falls within this month (inclusive of both ends).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for PayrollMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PayrollMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::validation("month", format!("expected YYYY-MM, got '{}'", s));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for PayrollMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayrollMonth> for String {
    fn from(month: PayrollMonth) -> Self {
        month.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_valid_month() {
        let month: PayrollMonth = "2024-03".parse().unwrap();
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 3);
    }

    #[test]
    fn test_parse_rejects_month_thirteen() {
        let result = "2024-13".parse::<PayrollMonth>();
        assert!(matches!(
            result,
            Err(EngineError::Validation { ref field, .. }) if field == "month"
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "2024", "2024-3", "24-03", "2024-03-01", "march", "2024-0a"] {
            assert!(
                input.parse::<PayrollMonth>().is_err(),
                "'{}' should not parse",
                input
            );
        }
    }

    #[test]
    fn test_display_pads_month() {
        let month = PayrollMonth::new(2024, 2).unwrap();
        assert_eq!(month.to_string(), "2024-02");
    }

    #[test]
    fn test_first_day_of_leap_february() {
        let feb = PayrollMonth::new(2024, 2).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
    }

    #[test]
    fn test_contains_date_boundaries() {
        let march = PayrollMonth::new(2024, 3).unwrap();
        assert!(march.contains_date(date(2024, 3, 1)));
        assert!(march.contains_date(date(2024, 3, 31)));
        assert!(!march.contains_date(date(2024, 2, 29)));
        assert!(!march.contains_date(date(2024, 4, 1)));
        assert!(!march.contains_date(date(2023, 3, 15)));
    }

    #[test]
    fn test_next_wraps_year() {
        let dec = PayrollMonth::new(2023, 12).unwrap();
        assert_eq!(dec.next(), PayrollMonth::new(2024, 1).unwrap());
        assert_eq!(dec.next().next(), PayrollMonth::new(2024, 2).unwrap());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = PayrollMonth::new(2023, 12).unwrap();
        let b = PayrollMonth::new(2024, 1).unwrap();
        let c = PayrollMonth::new(2024, 11).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_of_date() {
        assert_eq!(
            PayrollMonth::of(date(2024, 3, 5)),
            PayrollMonth::new(2024, 3).unwrap()
        );
    }

    #[test]
    fn test_serde_as_string() {
        let month = PayrollMonth::new(2024, 3).unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2024-03\"");

        let parsed: PayrollMonth = serde_json::from_str("\"2024-03\"").unwrap();
        assert_eq!(parsed, month);

        assert!(serde_json::from_str::<PayrollMonth>("\"2024-00\"").is_err());
    }
}
