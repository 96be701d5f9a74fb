//! Posting-date parsing and the upcoming-exits window.
//!
//! Posting dates travel through the API as `dd.mm.yyyy` strings and must
//! round-trip exactly. The upcoming-exits window never extends past day 28 of
//! the current month; this sidesteps February and 30-day-month overflow and is
//! intentionally not calendar-accurate.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Display format for posting dates.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Last day-of-month the upcoming-exits window ever reaches.
pub const WINDOW_END_DAY: u32 = 28;

/// Errors for posting-date handling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The supplied date string is not a valid `dd.mm.yyyy` date.
    #[error("invalid date '{0}', expected dd.mm.yyyy")]
    InvalidDate(String),
}

/// Parses a `dd.mm.yyyy` posting date.
///
/// # Errors
///
/// Returns `CalendarError::InvalidDate` if the string does not parse.
pub fn parse_display_date(input: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(input.trim(), DISPLAY_DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(input.to_string()))
}

/// Formats a posting date back to `dd.mm.yyyy`.
#[must_use]
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Computes the upcoming-exits date window for `today`.
///
/// The window spans `[min(day, 28), 28]` within the current month, where
/// `day` defaults to today's day-of-month. For `day >= 29` the window
/// degenerates to the single day 28.
#[must_use]
pub fn exit_window(today: NaiveDate, day: Option<u32>) -> (NaiveDate, NaiveDate) {
    let requested = day.unwrap_or_else(|| today.day());
    let start_day = requested.clamp(1, WINDOW_END_DAY);

    // Days 1..=28 exist in every month, so with_day cannot fail here.
    let start = today.with_day(start_day).unwrap_or(today);
    let end = today.with_day(WINDOW_END_DAY).unwrap_or(today);
    (start, end)
}
