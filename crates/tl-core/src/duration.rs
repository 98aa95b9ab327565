//! Duration text parsing and minutes formatting.
//!
//! Durations appear in the `break` field of an entry as free-form token
//! sequences such as `"30m"`, `"1.5h"` or `"1h 30m"`. Parsing is lenient:
//! unmatched text contributes nothing and the parser never fails.

use std::sync::LazyLock;

use regex::Regex;

/// Hour tokens: an integer or decimal number followed by `h`.
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*h").unwrap());

/// Upper bound of a parsed duration, in minutes.
pub const MAX_DURATION_MINUTES: i64 = 2_147_483_647;

/// Minute tokens: an integer followed by `m`.
static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)\s*m").unwrap());

/// Parses duration text into whole minutes.
///
/// Every hour token and every minute token is summed independently, so
/// `"1h 30m"` is 90 and a malformed `"1h 1h"` is 120. Returns 0 for empty
/// text or text without any tokens. The sum is rounded to the nearest minute
/// and capped at [`MAX_DURATION_MINUTES`].
#[expect(
    clippy::cast_possible_truncation,
    reason = "the rounded sum is clamped to MAX_DURATION_MINUTES before the cast"
)]
pub fn parse_duration(text: &str) -> i64 {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return 0;
    }

    let hours: f64 = HOURS_RE
        .captures_iter(&normalized)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .filter(|h| h.is_finite())
        .map(|h| h * 60.0)
        .sum();

    let minutes: f64 = MINUTES_RE
        .captures_iter(&normalized)
        .filter_map(|caps| caps[1].parse::<f64>().ok())
        .filter(|m| m.is_finite())
        .sum();

    // MAX_DURATION_MINUTES is i32::MAX, exactly representable as f64.
    let total = (hours + minutes).round().min(f64::from(i32::MAX));
    total as i64
}

/// Parses an optional duration field; absent is 0.
pub fn parse_optional_duration(text: Option<&str>) -> i64 {
    text.map_or(0, parse_duration)
}

/// Formats whole minutes as `"Xh Ym"`, `"Xh"` or `"Ym"`.
///
/// Zero and negative values render as `"0m"`.
pub fn format_minutes(total_minutes: i64) -> String {
    if total_minutes <= 0 {
        return "0m".to_string();
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours > 0, minutes > 0) {
        (true, true) => format!("{hours}h {minutes}m"),
        (true, false) => format!("{hours}h"),
        (false, true) => format!("{minutes}m"),
        (false, false) => "0m".to_string(),
    }
}
