//! Calendar-date helpers.
//!
//! All booking dates are plain local calendar days (`NaiveDate`), serialized
//! as `YYYY-MM-DD`. Nothing here goes through UTC, so a booking made just
//! before midnight keeps the day the customer sees on their calendar.

use chrono::{Datelike, Duration, Local, NaiveDate};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date stamp: {0}")]
    InvalidStamp(String),
}

/// The caller's local calendar date.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Date `n` days after `date`, rolling over month and year boundaries.
pub fn add_days(date: NaiveDate, n: u32) -> NaiveDate {
    date + Duration::days(i64::from(n))
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parse a `YYYY-MM-DD` stamp.
pub fn parse_iso(stamp: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(stamp.trim(), "%Y-%m-%d")
        .map_err(|_| DateError::InvalidStamp(stamp.to_string()))
}

/// `dd/mm/yyyy`, the way dates read in customer-facing messages.
pub fn format_dmy(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{:04}", date.day(), date.month(), date.year())
}
