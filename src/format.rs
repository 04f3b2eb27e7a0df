//! Number and date formatting helpers for display.
//!
//! Dates render the way an en-IN locale shows them: `14 Oct 2026` and
//! `14 Oct 2026, 03:45 pm`.  Timestamps with an offset are shown in that
//! offset's wall-clock time; naive timestamps are shown as given.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::FormatError;

const DATE_FORMAT: &str = "%-d %b %Y";
const DATE_TIME_FORMAT: &str = "%-d %b %Y, %I:%M %P";

/// Naive timestamp layouts accepted besides RFC 3339.
const NAIVE_LAYOUTS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Fixed-point rendering with `decimals` digits after the point.
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    // -0.0 + 0.0 is +0.0: negative zero renders unsigned.
    let value = value + 0.0;
    format!("{value:.decimals$}")
}

/// `2026-10-14` / `2026-10-14 09:30:00` → `14 Oct 2026`.
pub fn format_date(input: &str) -> Result<String, FormatError> {
    Ok(parse_timestamp(input)?.format(DATE_FORMAT).to_string())
}

/// `2026-10-14T15:45:00+05:30` → `14 Oct 2026, 03:45 pm`.
pub fn format_date_time(input: &str) -> Result<String, FormatError> {
    Ok(parse_timestamp(input)?.format(DATE_TIME_FORMAT).to_string())
}

/// Parse any accepted layout into a wall-clock timestamp.
/// Date-only input becomes midnight.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, FormatError> {
    let raw = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, layout) {
            return Ok(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(FormatError::InvalidDate(raw.to_owned()))
}
