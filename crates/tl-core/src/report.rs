//! Month report tables.
//!
//! A report is the printable view of one month: a row per entry grouped by
//! ISO week, the month total, and the period actually covered by the month's
//! dates. Turning it into a PDF or any other layout is up to the caller.

use rayon::prelude::*;
use serde::Serialize;

use crate::aggregate::{SortOrder, entry_status, group_weeks, month_total};
use crate::calendar::{format_date, parse_date};
use crate::duration::format_minutes;
use crate::model::{DayLog, LogDocument, Period};
use crate::month::MonthName;

/// Column titles, in row order.
pub const REPORT_HEADER: [&str; 6] = ["Date", "From", "To", "Break", "Duration", "Note"];

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub date: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "break")]
    pub break_time: String,
    /// Formatted duration or status label.
    pub duration: String,
    pub note: String,
}

impl ReportRow {
    /// Cells in [`REPORT_HEADER`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.from.as_str(),
            self.to.as_str(),
            self.break_time.as_str(),
            self.duration.as_str(),
            self.note.as_str(),
        ]
    }
}

/// Rows of one ISO week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportWeek {
    pub iso_year: i32,
    pub week_number: u32,
    pub total_minutes: i64,
    pub total: String,
    pub rows: Vec<ReportRow>,
}

/// Printable summary of one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthReport {
    pub project: String,
    pub month: MonthName,
    /// Earliest and latest valid date keys of the month, if any.
    pub period: Option<Period>,
    pub header: [&'static str; 6],
    pub weeks: Vec<ReportWeek>,
    pub total_minutes: i64,
    pub total: String,
}

/// Builds the report for one month of a document.
///
/// Returns `None` when the document has no section for `month`.
pub fn month_report(doc: &LogDocument, month: MonthName, order: SortOrder) -> Option<MonthReport> {
    let days = doc.month(month)?;
    Some(build_report(&doc.project, month, days, order))
}

/// Builds reports for every month section, in `order`.
///
/// Months are independent, so they are built in parallel.
pub fn all_reports(doc: &LogDocument, order: SortOrder) -> Vec<MonthReport> {
    doc.months_ordered(order)
        .par_iter()
        .map(|(month, days)| build_report(&doc.project, *month, days, order))
        .collect()
}

fn build_report(project: &str, month: MonthName, days: &DayLog, order: SortOrder) -> MonthReport {
    let weeks = group_weeks(days, order)
        .into_iter()
        .map(|week| {
            let rows = week
                .days
                .iter()
                .flat_map(|day| {
                    day.entries.iter().map(move |entry| ReportRow {
                        date: day.date_key.to_string(),
                        from: entry.from.clone(),
                        to: entry.to.clone(),
                        break_time: entry.break_time.clone().unwrap_or_default(),
                        duration: entry_status(day.date, entry).label(),
                        note: entry.note.clone().unwrap_or_default(),
                    })
                })
                .collect();
            let total_minutes = week.total_minutes();
            ReportWeek {
                iso_year: week.iso_year,
                week_number: week.week_number,
                total_minutes,
                total: format_minutes(total_minutes),
                rows,
            }
        })
        .collect();

    let total_minutes = month_total(days);

    MonthReport {
        project: project.to_string(),
        month,
        period: covered_period(days),
        header: REPORT_HEADER,
        weeks,
        total_minutes,
        total: format_minutes(total_minutes),
    }
}

/// Earliest and latest valid date keys in a month.
fn covered_period(days: &DayLog) -> Option<Period> {
    let mut dates = days.keys().filter_map(|key| parse_date(key));
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(Period {
        from: format_date(min),
        to: format_date(max),
    })
}
