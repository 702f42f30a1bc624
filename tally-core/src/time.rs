//! Date utilities: lenient parsing and calendar-month bucketing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A (year, month) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parse a transaction date in any of the common export formats.
/// Timestamps keep only their date part.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Count distinct calendar months among the given dates, floored at 1.
pub fn months_observed<I>(dates: I) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let months: BTreeSet<MonthKey> = dates.into_iter().map(MonthKey::of).collect();
    (months.len() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_common_formats() {
        assert_eq!(parse_date("2024-01-15"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("01/15/2024"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("2024/01/15"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("15-Jan-2024"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15 08:30:00"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T08:30:00+00:00"), Some(d(2024, 1, 15)));
        assert_eq!(parse_date("  "), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_months_observed() {
        assert_eq!(months_observed(Vec::new()), 1);
        assert_eq!(months_observed(vec![d(2024, 1, 1), d(2024, 1, 31)]), 1);
        assert_eq!(
            months_observed(vec![d(2024, 1, 1), d(2024, 2, 1), d(2025, 1, 3)]),
            3
        );
    }

    #[test]
    fn test_month_key_display() {
        assert_eq!(MonthKey::of(d(2024, 3, 9)).to_string(), "2024-03");
    }
}
