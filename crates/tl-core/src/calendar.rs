//! Calendar dates (`DD-MM-YYYY`) and clock times (`HH:mm`).
//!
//! Both parsers are sentinel-returning: malformed input resolves to `None`
//! and the caller decides how to display it.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// `chrono` format string for date keys.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Clock time as one or two hour digits, a colon and two minute digits.
static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})$").unwrap());

/// Parses a `DD-MM-YYYY` date key.
///
/// The parsed date is formatted again and compared with the input. Any
/// difference (an impossible day such as `31-02-2025`, missing zero padding,
/// stray whitespace) rejects the key instead of normalizing it.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let Ok(date) = NaiveDate::parse_from_str(text, DATE_FORMAT) else {
        tracing::debug!(date = text, "unparseable date key");
        return None;
    };

    let formatted = format_date(date);
    if formatted != text {
        tracing::debug!(date = text, resolved = %formatted, "date key does not round-trip");
        return None;
    }

    Some(date)
}

/// Formats a calendar day as a `DD-MM-YYYY` date key.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Resolves an `HH:mm` clock time on the given day.
///
/// Returns `None` when the text is not of the form `H:mm`/`HH:mm` or when
/// the hour is above 23 or the minute above 59. Seconds are always zero.
pub fn resolve_time(day: NaiveDate, text: &str) -> Option<NaiveDateTime> {
    let Some(caps) = CLOCK_RE.captures(text) else {
        tracing::debug!(time = text, "invalid time format, expected HH:mm");
        return None;
    };

    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 23 || minute > 59 {
        tracing::debug!(time = text, "time value out of range");
        return None;
    }

    day.and_hms_opt(hour, minute, 0)
}
