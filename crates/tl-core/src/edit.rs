//! Copy-on-write edits of a [`LogDocument`].

use std::cmp::Reverse;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::calendar::{format_date, parse_date, resolve_time};
use crate::model::{LogDocument, TimeEntry};
use crate::month::MonthName;

/// Break text accepted for new entries: a single hour or minute token.
static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?\s*h$|^[0-9]+\s*m$").unwrap());

/// Strict two-digit clock time accepted for new entries.
static NEW_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").unwrap());

/// Break stored when none is given.
pub const DEFAULT_BREAK: &str = "0m";

/// Rejected new-entry input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The date is neither a real `DD-MM-YYYY` nor `YYYY-MM-DD` date.
    #[error("invalid date: {0} (expected DD-MM-YYYY)")]
    InvalidDate(String),

    /// A clock time is not a valid `HH:mm` value.
    #[error("invalid '{field}' time: {value} (expected HH:mm)")]
    InvalidTime { field: &'static str, value: String },

    /// The break is not a single `<number>h` or `<integer>m` token.
    #[error("invalid break format: {0} (use numbers followed by 'h' or 'm', e.g. '1h', '30m')")]
    InvalidBreak(String),
}

/// User input for a new entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    /// `DD-MM-YYYY`, or `YYYY-MM-DD` as produced by date pickers.
    pub date: String,
    pub from: String,
    pub to: String,
    pub break_time: Option<String>,
    pub note: Option<String>,
}

/// A validated new entry ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub date: NaiveDate,
    /// Canonical `DD-MM-YYYY` key.
    pub date_key: String,
    pub entry: TimeEntry,
}

impl NewEntry {
    /// Validates the input and normalizes the date key and break text.
    pub fn validate(&self) -> Result<ValidatedEntry, EntryError> {
        let date = normalize_date_input(&self.date)
            .ok_or_else(|| EntryError::InvalidDate(self.date.clone()))?;

        for (field, value) in [("from", &self.from), ("to", &self.to)] {
            if !NEW_TIME_RE.is_match(value) || resolve_time(date, value).is_none() {
                return Err(EntryError::InvalidTime {
                    field,
                    value: value.clone(),
                });
            }
        }

        let break_text = self.break_time.as_deref().map(str::trim).unwrap_or_default();
        let break_time = if break_text.is_empty() {
            DEFAULT_BREAK.to_string()
        } else if BREAK_RE.is_match(break_text) {
            break_text.to_string()
        } else {
            return Err(EntryError::InvalidBreak(break_text.to_string()));
        };

        let note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);

        Ok(ValidatedEntry {
            date,
            date_key: format_date(date),
            entry: TimeEntry {
                from: self.from.clone(),
                to: self.to.clone(),
                break_time: Some(break_time),
                note,
            },
        })
    }
}

/// Accepts `DD-MM-YYYY` or ISO `YYYY-MM-DD`.
fn normalize_date_input(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    parse_date(text).or_else(|| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .filter(|d| d.format("%Y-%m-%d").to_string() == text)
    })
}

/// Returns a copy of `doc` with the new entry added.
///
/// The month and day containers are created when missing. Afterwards the
/// day's entries are ordered by start time, latest first; entries whose
/// start does not resolve go last. `doc` itself is never modified.
pub fn add_entry(doc: &LogDocument, new_entry: &NewEntry) -> Result<LogDocument, EntryError> {
    let validated = new_entry.validate()?;
    let month = MonthName::of(validated.date);

    let mut next = doc.clone();
    let entries = next
        .months
        .entry(month)
        .or_default()
        .entry(validated.date_key.clone())
        .or_default();
    entries.push(validated.entry);
    entries.sort_by_key(|e| Reverse(resolve_time(validated.date, &e.from)));

    tracing::debug!(
        month = %month,
        date = %validated.date_key,
        entries = entries.len(),
        "added entry"
    );

    Ok(next)
}
