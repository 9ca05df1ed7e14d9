//! Timestamp parsers for OpenVPN status documents.
//!
//! OpenVPN writes its "last updated" time in three different shapes
//! depending on the status file flavour:
//! - Server status-version 2/3 (`TIME` record): raw epoch seconds `1729416188`
//! - Server status-version 1 (`Updated,` line): `2024-10-21 09:23:08`, UTC
//! - Client statistics (`Updated,` line): `Sun Oct 20 09:23:08 2024`, local time
//!
//! The forms are never interchanged: each dialect calls exactly one of them.

use chrono::{Local, NaiveDateTime, TimeZone, Utc, Weekday};

/// Format of the `Updated,` line in server status-version 1 files.
const STATUS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ctime(3)-style format used in client statistics files, minus the
/// leading weekday.
const CTIME_DATE_FORMAT: &str = "%b %e %H:%M:%S %Y";

/// Error type for time parsing failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("failed to parse time '{input}': {message}")]
pub struct TimeParseError {
    pub input: String,
    pub message: String,
}

impl TimeParseError {
    fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

/// Parses `YYYY-MM-DD HH:MM:SS` into a Unix timestamp.
///
/// Surrounding whitespace is ignored. The value carries no timezone and is
/// taken as-is (UTC), no local conversion is applied.
pub fn parse_status_time(input: &str) -> Result<i64, TimeParseError> {
    let input = input.trim();
    let ndt = NaiveDateTime::parse_from_str(input, STATUS_TIME_FORMAT)
        .map_err(|e| TimeParseError::new(input, e.to_string()))?;
    Ok(Utc.from_utc_datetime(&ndt).timestamp())
}

/// Parses a ctime-style `Mon Jan 2 15:04:05 2006` string in the local timezone.
///
/// Single-digit days may be written with or without space padding
/// (`Jan 2` and `Jan  2` are both accepted). The weekday must be a weekday
/// name but is not checked against the date.
pub fn parse_local_ctime(input: &str) -> Result<i64, TimeParseError> {
    let (weekday, date) = input
        .split_once(' ')
        .ok_or_else(|| TimeParseError::new(input, "missing weekday"))?;
    weekday
        .parse::<Weekday>()
        .map_err(|_| TimeParseError::new(input, format!("invalid weekday '{weekday}'")))?;

    let ndt = NaiveDateTime::parse_from_str(date.trim_start(), CTIME_DATE_FORMAT)
        .map_err(|e| TimeParseError::new(input, e.to_string()))?;

    // DST gaps have no mapping; folds resolve to the earlier instant.
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| TimeParseError::new(input, "nonexistent local time"))
}

/// Parses a raw epoch-seconds value, possibly fractional.
pub fn parse_epoch_seconds(input: &str) -> Result<f64, TimeParseError> {
    input
        .parse::<f64>()
        .map_err(|e| TimeParseError::new(input, e.to_string()))
}
