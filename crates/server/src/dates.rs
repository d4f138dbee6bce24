//! Date formatting and arithmetic helpers.
//!
//! Pickup dates are calendar dates with no time component; all arithmetic
//! happens on `NaiveDate` to avoid timezone shifting.

use chrono::{Days, NaiveDate, Utc};

/// Format a date as e.g. "December 6, 2025" (emails and subjects).
#[must_use]
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date as e.g. "Saturday, December 6, 2025".
#[must_use]
pub fn format_full(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// The calendar date of the day after today (UTC).
#[must_use]
pub fn tomorrow() -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or_else(|| Utc::now().date_naive())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_long() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 6).unwrap();
        assert_eq!(format_long(date), "December 6, 2025");
    }

    #[test]
    fn test_format_long_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
        assert_eq!(format_long(date), "December 7, 2025");
    }

    #[test]
    fn test_format_full() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 6).unwrap();
        assert_eq!(format_full(date), "Saturday, December 6, 2025");
    }

    #[test]
    fn test_tomorrow_is_after_today() {
        assert!(tomorrow() > Utc::now().date_naive());
    }
}
