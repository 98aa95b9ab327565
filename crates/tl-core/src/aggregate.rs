//! Worked-time aggregation.
//!
//! Computes per-entry, per-day and per-month worked minutes and groups a
//! month's days into ISO weeks.
//!
//! # Entry policy
//!
//! An entry whose `from` or `to` does not resolve, or whose end is not
//! strictly after its start, contributes zero and is reported with a status
//! label instead of a duration. Otherwise the duration is the span minus the
//! parsed break. That value is **not** clamped: a break longer than the span
//! yields a negative contribution, and only [`format_minutes`] renders it as
//! `"0m"`. Display and summation therefore use the same number.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{parse_date, resolve_time};
use crate::duration::{format_minutes, parse_optional_duration};
use crate::model::{DayLog, TimeEntry};

/// Listing order for weeks, days and months.
///
/// Chronological listings and most-recent-first listings both exist, so
/// every grouping function takes the order explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Most recent first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Compares two keys according to this order.
    pub fn compare<T: Ord>(self, a: &T, b: &T) -> Ordering {
        match self {
            Self::Ascending => a.cmp(b),
            Self::Descending => b.cmp(a),
        }
    }

    /// String representation for configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!(
                "invalid sort order: {s} (expected 'asc' or 'desc')"
            )),
        }
    }
}

/// Outcome of evaluating a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// Both times resolved and the end is after the start.
    ///
    /// `minutes` is the span minus the break and may be negative.
    Worked { minutes: i64 },
    /// `from` or `to` did not resolve.
    Invalid,
    /// Both times resolved but the end is at or before the start.
    NonPositive,
}

impl EntryStatus {
    /// Minutes this entry adds to day, week and month totals.
    #[must_use]
    pub const fn contribution(self) -> i64 {
        match self {
            Self::Worked { minutes } => minutes,
            Self::Invalid | Self::NonPositive => 0,
        }
    }

    /// Human-readable duration or status label.
    pub fn label(self) -> String {
        match self {
            Self::Worked { minutes } => format_minutes(minutes),
            Self::Invalid => "Invalid".to_string(),
            Self::NonPositive => "Negative/Zero".to_string(),
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Evaluates one entry on its calendar day.
pub fn entry_status(day: NaiveDate, entry: &TimeEntry) -> EntryStatus {
    let (Some(start), Some(end)) = (resolve_time(day, &entry.from), resolve_time(day, &entry.to))
    else {
        return EntryStatus::Invalid;
    };

    if end <= start {
        return EntryStatus::NonPositive;
    }

    let break_minutes = parse_optional_duration(entry.break_time.as_deref());
    EntryStatus::Worked {
        minutes: (end - start).num_minutes() - break_minutes,
    }
}

/// Sum of entry contributions for one day.
pub fn day_total(day: NaiveDate, entries: &[TimeEntry]) -> i64 {
    entries
        .iter()
        .map(|entry| entry_status(day, entry).contribution())
        .fold(0, i64::saturating_add)
}

/// Sum of day totals over every date key that parses.
///
/// Unparseable keys are skipped silently.
pub fn month_total(days: &DayLog) -> i64 {
    days.iter()
        .filter_map(|(key, entries)| parse_date(key).map(|date| day_total(date, entries)))
        .fold(0, i64::saturating_add)
}

/// One day inside a week group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayGroup<'a> {
    /// The date key as written in the document.
    pub date_key: &'a str,
    pub date: NaiveDate,
    pub entries: &'a [TimeEntry],
}

impl DayGroup<'_> {
    /// Worked minutes for this day.
    pub fn total_minutes(&self) -> i64 {
        day_total(self.date, self.entries)
    }
}

/// Days sharing an ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGroup<'a> {
    /// ISO week-numbering year. Differs from the calendar year around New Year.
    pub iso_year: i32,
    /// ISO week number (1..=53), weeks starting on Monday.
    pub week_number: u32,
    pub days: Vec<DayGroup<'a>>,
}

impl WeekGroup<'_> {
    /// Worked minutes for the whole week.
    pub fn total_minutes(&self) -> i64 {
        self.days
            .iter()
            .map(DayGroup::total_minutes)
            .fold(0, i64::saturating_add)
    }
}

/// Groups a month's days by ISO week.
///
/// Keys that fail to parse and days without entries are left out. Weeks are
/// keyed by ISO year and week number, so every remaining key lands in exactly
/// one group even when a month log spans a year boundary. Both the weeks and
/// the days inside each week follow `order`.
pub fn group_weeks(days: &DayLog, order: SortOrder) -> Vec<WeekGroup<'_>> {
    let mut dated: Vec<DayGroup<'_>> = days
        .iter()
        .filter(|(_, entries)| !entries.is_empty())
        .filter_map(|(key, entries)| {
            parse_date(key).map(|date| DayGroup {
                date_key: key.as_str(),
                date,
                entries: entries.as_slice(),
            })
        })
        .collect();
    dated.sort_by(|a, b| order.compare(&a.date, &b.date));

    let mut weeks: BTreeMap<(i32, u32), Vec<DayGroup<'_>>> = BTreeMap::new();
    for day in dated {
        let iso = day.date.iso_week();
        weeks.entry((iso.year(), iso.week())).or_default().push(day);
    }

    let groups = weeks
        .into_iter()
        .map(|((iso_year, week_number), days)| WeekGroup {
            iso_year,
            week_number,
            days,
        });

    match order {
        SortOrder::Ascending => groups.collect(),
        SortOrder::Descending => groups.rev().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::MAX_DURATION_MINUTES;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day_log(days: &[(&str, Vec<TimeEntry>)]) -> DayLog {
        days.iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    // ========== Entry Status Tests ==========

    #[test]
    fn full_day_with_break() {
        let entry = TimeEntry::new("09:00", "17:00").with_break("30m");
        let status = entry_status(day(2025, 6, 1), &entry);
        assert_eq!(status, EntryStatus::Worked { minutes: 450 });
        assert_eq!(status.label(), "7h 30m");
    }

    #[test]
    fn zero_span_is_non_positive() {
        let entry = TimeEntry::new("09:00", "09:00");
        let status = entry_status(day(2025, 6, 1), &entry);
        assert_eq!(status, EntryStatus::NonPositive);
        assert_eq!(status.contribution(), 0);
        assert_eq!(status.to_string(), "Negative/Zero");
    }

    #[test]
    fn overnight_span_is_non_positive() {
        let entry = TimeEntry::new("22:00", "02:00");
        assert_eq!(
            entry_status(day(2025, 6, 1), &entry),
            EntryStatus::NonPositive
        );
    }

    #[test]
    fn unresolvable_time_is_invalid() {
        let entry = TimeEntry::new("9:99", "17:00");
        let status = entry_status(day(2025, 6, 1), &entry);
        assert_eq!(status, EntryStatus::Invalid);
        assert_eq!(status.contribution(), 0);
        assert_eq!(status.label(), "Invalid");

        let entry = TimeEntry::new("09:00", "");
        assert_eq!(entry_status(day(2025, 6, 1), &entry), EntryStatus::Invalid);
    }

    #[test]
    fn break_longer_than_span_goes_negative_but_formats_as_zero() {
        let entry = TimeEntry::new("09:00", "09:30").with_break("1h");
        let status = entry_status(day(2025, 6, 1), &entry);
        assert_eq!(status, EntryStatus::Worked { minutes: -30 });
        assert_eq!(status.contribution(), -30);
        assert_eq!(status.label(), "0m");
    }

    #[test]
    fn unparseable_break_counts_as_zero() {
        let entry = TimeEntry::new("09:00", "10:00").with_break("lunch");
        assert_eq!(
            entry_status(day(2025, 6, 1), &entry),
            EntryStatus::Worked { minutes: 60 }
        );
    }

    // ========== Totals Tests ==========

    #[test]
    fn day_total_is_sum_of_contributions() {
        let base = day(2025, 6, 1);
        let entries = vec![
            TimeEntry::new("09:00", "12:00"),
            TimeEntry::new("13:00", "17:00").with_break("15m"),
            TimeEntry::new("09:00", "09:00"),
            TimeEntry::new("25:00", "26:00"),
            TimeEntry::new("18:00", "18:10").with_break("1h"),
        ];

        let independent: i64 = entries
            .iter()
            .map(|e| entry_status(base, e).contribution())
            .sum();
        assert_eq!(day_total(base, &entries), independent);
        assert_eq!(day_total(base, &entries), 180 + 225 - 50);
    }

    #[test]
    fn month_total_skips_invalid_date_keys() {
        let days = day_log(&[
            ("01-06-2025", vec![TimeEntry::new("09:00", "10:00")]),
            ("31-06-2025", vec![TimeEntry::new("09:00", "17:00")]),
            ("not a date", vec![TimeEntry::new("09:00", "17:00")]),
            ("02-06-2025", vec![TimeEntry::new("09:00", "09:45")]),
        ]);
        assert_eq!(month_total(&days), 105);
    }

    #[test]
    fn huge_breaks_stay_finite_across_totals() {
        let huge = "99999999999999999999h";
        let entries = vec![
            TimeEntry::new("09:00", "10:00").with_break(huge),
            TimeEntry::new("11:00", "12:00").with_break(huge),
        ];
        let expected_day = 120 - 2 * MAX_DURATION_MINUTES;
        assert_eq!(day_total(day(2025, 6, 2), &entries), expected_day);
        assert_eq!(format_minutes(day_total(day(2025, 6, 2), &entries)), "0m");

        let days = day_log(&[("02-06-2025", entries.clone()), ("03-06-2025", entries)]);
        assert_eq!(month_total(&days), 2 * expected_day);

        let weeks = group_weeks(&days, SortOrder::Ascending);
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].total_minutes(), 2 * expected_day);
    }

    #[test]
    fn month_total_of_empty_log_is_zero() {
        assert_eq!(month_total(&DayLog::new()), 0);
    }

    // ========== Week Grouping Tests ==========

    fn keys(groups: &[WeekGroup<'_>]) -> Vec<(u32, Vec<String>)> {
        groups
            .iter()
            .map(|g| {
                (
                    g.week_number,
                    g.days.iter().map(|d| d.date_key.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn groups_by_monday_start_weeks() {
        // 01-06-2025 is a Sunday, 02-06-2025 a Monday.
        let entry = || vec![TimeEntry::new("09:00", "10:00")];
        let days = day_log(&[
            ("03-06-2025", entry()),
            ("01-06-2025", entry()),
            ("02-06-2025", entry()),
            ("09-06-2025", entry()),
        ]);

        let asc = group_weeks(&days, SortOrder::Ascending);
        assert_eq!(
            keys(&asc),
            vec![
                (22, vec!["01-06-2025".to_string()]),
                (23, vec!["02-06-2025".to_string(), "03-06-2025".to_string()]),
                (24, vec!["09-06-2025".to_string()]),
            ]
        );

        let desc = group_weeks(&days, SortOrder::Descending);
        assert_eq!(
            keys(&desc),
            vec![
                (24, vec!["09-06-2025".to_string()]),
                (23, vec!["03-06-2025".to_string(), "02-06-2025".to_string()]),
                (22, vec!["01-06-2025".to_string()]),
            ]
        );
    }

    #[test]
    fn excludes_invalid_and_empty_days() {
        let days = day_log(&[
            ("02-06-2025", vec![TimeEntry::new("09:00", "10:00")]),
            ("03-06-2025", vec![]),
            ("31-06-2025", vec![TimeEntry::new("09:00", "10:00")]),
        ]);
        let groups = group_weeks(&days, SortOrder::Ascending);
        assert_eq!(keys(&groups), vec![(23, vec!["02-06-2025".to_string()])]);
    }

    #[test]
    fn year_boundary_assigns_each_key_to_exactly_one_week() {
        // 30-12-2024 (Mon) and 01-01-2025 (Wed) are both in ISO week 1 of 2025;
        // 29-12-2024 (Sun) is in week 52 of 2024; 01-01-2024 is week 1 of 2024.
        let entry = || vec![TimeEntry::new("09:00", "10:00")];
        let days = day_log(&[
            ("29-12-2024", entry()),
            ("30-12-2024", entry()),
            ("01-01-2025", entry()),
            ("01-01-2024", entry()),
        ]);

        let groups = group_weeks(&days, SortOrder::Ascending);
        let ids: Vec<_> = groups.iter().map(|g| (g.iso_year, g.week_number)).collect();
        assert_eq!(ids, vec![(2024, 1), (2024, 52), (2025, 1)]);

        let mut seen: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.days.iter().map(|d| d.date_key))
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = days.keys().map(String::as_str).collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);

        let last = groups.last().unwrap();
        assert_eq!(
            last.days.iter().map(|d| d.date_key).collect::<Vec<_>>(),
            vec!["30-12-2024", "01-01-2025"]
        );
    }

    #[test]
    fn week_total_sums_days() {
        let days = day_log(&[
            ("02-06-2025", vec![TimeEntry::new("09:00", "10:00")]),
            ("03-06-2025", vec![TimeEntry::new("09:00", "11:30")]),
        ]);
        let groups = group_weeks(&days, SortOrder::Ascending);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].total_minutes(), 210);
    }

    // ========== SortOrder Tests ==========

    #[test]
    fn sort_order_from_str() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!(
            "descending".parse::<SortOrder>().unwrap(),
            SortOrder::Descending
        );
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn sort_order_serde_roundtrip() {
        let json = serde_json::to_string(&SortOrder::Ascending).unwrap();
        assert_eq!(json, "\"ascending\"");
        let parsed: SortOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SortOrder::Ascending);
    }
}
