//! Core domain logic for time logs embedded in notes.
//!
//! This crate contains the fundamental types and logic for:
//! - Parsing: duration text, `HH:mm` clock times, `DD-MM-YYYY` date keys
//! - Model: the typed time-log document (project, period, months)
//! - Aggregation: entry status, day/month totals, ISO week grouping
//! - Editing and reporting: copy-on-write entry insertion, month reports

pub mod aggregate;
pub mod calendar;
pub mod duration;
pub mod edit;
pub mod model;
pub mod month;
pub mod report;
pub mod view;

pub use aggregate::{
    DayGroup, EntryStatus, SortOrder, WeekGroup, day_total, entry_status, group_weeks,
    month_total,
};
pub use calendar::{format_date, parse_date, resolve_time};
pub use duration::{MAX_DURATION_MINUTES, format_minutes, parse_duration};
pub use edit::{EntryError, NewEntry, add_entry};
pub use model::{DayLog, LogDocument, Period, TimeEntry};
pub use month::{MonthName, UnknownMonth};
pub use report::{MonthReport, ReportRow, ReportWeek, all_reports, month_report};
pub use view::{ViewContext, default_expanded};
