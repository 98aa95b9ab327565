//! In-memory time-log document.
//!
//! The block's wire shape is a flat mapping with two reserved keys
//! (`project`, `period`) next to month-name keys. In memory the months live
//! in their own ordered map keyed by [`MonthName`], so reserved keys and
//! month sections cannot collide.

use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregate::SortOrder;
use crate::month::MonthName;

/// One worked interval.
///
/// `from` and `to` are kept as written. Validation happens when the entry
/// is aggregated, so malformed times are representable and displayed as
/// invalid rather than rejected on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeEntry {
    /// Start clock time (`HH:mm`).
    pub from: String,

    /// End clock time (`HH:mm`).
    pub to: String,

    /// Break duration text (e.g. `"30m"`).
    #[serde(rename = "break", skip_serializing_if = "Option::is_none")]
    pub break_time: Option<String>,

    /// Free-text note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TimeEntry {
    /// Creates an entry without break or note.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            break_time: None,
            note: None,
        }
    }

    #[must_use]
    pub fn with_break(mut self, break_time: impl Into<String>) -> Self {
        self.break_time = Some(break_time.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Entries per date key (`DD-MM-YYYY`), in document order.
///
/// Keys stay textual so that unparseable keys survive a load/save cycle.
pub type DayLog = IndexMap<String, Vec<TimeEntry>>;

/// Nominal reporting window. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Period {
    pub from: String,
    pub to: String,
}

/// Root of a time-log block.
///
/// Converting to and from the flat wire mapping is the codec's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogDocument {
    pub project: String,
    pub period: Period,
    /// Month sections in document order.
    pub months: IndexMap<MonthName, DayLog>,
}

impl LogDocument {
    /// Creates an empty document.
    pub fn new(project: impl Into<String>, period: Period) -> Self {
        Self {
            project: project.into(),
            period,
            months: IndexMap::new(),
        }
    }

    /// Returns the day log for a month, if present.
    pub fn month(&self, month: MonthName) -> Option<&DayLog> {
        self.months.get(&month)
    }

    /// Month sections sorted by calendar position.
    pub fn months_ordered(&self, order: SortOrder) -> Vec<(MonthName, &DayLog)> {
        let mut months: Vec<_> = self.months.iter().map(|(m, d)| (*m, d)).collect();
        months.sort_by(|a, b| order.compare(&a.0, &b.0));
        months
    }

    /// Total number of entries across all months and days.
    pub fn entry_count(&self) -> usize {
        self.months
            .values()
            .flat_map(IndexMap::values)
            .map(Vec::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LogDocument {
        let mut doc = LogDocument::new(
            "Acme",
            Period {
                from: "01-05-2025".to_string(),
                to: "30-06-2025".to_string(),
            },
        );
        let mut may = DayLog::new();
        may.insert(
            "02-05-2025".to_string(),
            vec![TimeEntry::new("09:00", "12:00")],
        );
        let mut june = DayLog::new();
        june.insert(
            "01-06-2025".to_string(),
            vec![
                TimeEntry::new("09:00", "17:00").with_break("30m"),
                TimeEntry::new("18:00", "19:00").with_note("review"),
            ],
        );
        doc.months.insert(MonthName::June, june);
        doc.months.insert(MonthName::May, may);
        doc
    }

    #[test]
    fn months_ordered_follows_calendar() {
        let doc = sample();
        let asc: Vec<_> = doc
            .months_ordered(SortOrder::Ascending)
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(asc, vec![MonthName::May, MonthName::June]);

        let desc: Vec<_> = doc
            .months_ordered(SortOrder::Descending)
            .into_iter()
            .map(|(m, _)| m)
            .collect();
        assert_eq!(desc, vec![MonthName::June, MonthName::May]);
    }

    #[test]
    fn entry_count_sums_all_days() {
        assert_eq!(sample().entry_count(), 3);
    }

    #[test]
    fn entry_serializes_break_under_wire_name() {
        let entry = TimeEntry::new("09:00", "17:00").with_break("30m");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"from":"09:00","to":"17:00","break":"30m"}"#);
    }

    #[test]
    fn entry_omits_absent_optionals() {
        let entry = TimeEntry::new("09:00", "17:00");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"from":"09:00","to":"17:00"}"#);
    }
}
