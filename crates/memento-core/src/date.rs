//! Calendar-date helpers built on chrono.
//!
//! Every calculation in this crate works on `NaiveDate`, i.e. dates already
//! truncated to midnight, so DST transitions and time zones cannot shift a
//! day count by one.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{CoreError, Result};

/// Formats tried in order by [`parse_date`]. Day-first wins over month-first
/// for slash and dot forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Truncate a timestamp to its calendar date in its own time zone.
pub fn midnight<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.date_naive()
}

/// Parse a date typed by a user. Accepts ISO dates, day-first numeric dates,
/// month names, and full timestamps (time-of-day is dropped).
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::UnparsableDate(raw.to_string()));
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Ok(date);
        }
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(midnight(&at));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(at.date());
        }
    }

    Err(CoreError::UnparsableDate(raw.to_string()))
}
