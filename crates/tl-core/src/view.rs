//! Initial expand/collapse state for month and week sections.
//!
//! The current month and the current ISO week start expanded; everything
//! else starts collapsed unless the viewer asked to expand all.

use chrono::{Datelike, NaiveDate};

use crate::month::MonthName;

/// What "now" looks like to a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewContext {
    pub all_expanded: bool,
    pub current_month: MonthName,
    /// ISO week-numbering year of today.
    pub current_iso_year: i32,
    pub current_week: u32,
}

impl ViewContext {
    /// Builds the context for a given day.
    pub fn for_today(today: NaiveDate, all_expanded: bool) -> Self {
        let week = today.iso_week();
        Self {
            all_expanded,
            current_month: MonthName::of(today),
            current_iso_year: week.year(),
            current_week: week.week(),
        }
    }

    pub fn month_expanded(&self, month: MonthName) -> bool {
        self.all_expanded || month == self.current_month
    }

    /// Weeks are matched on ISO year and number, so week 1 of another year
    /// stays collapsed.
    pub fn week_expanded(&self, iso_year: i32, week_number: u32) -> bool {
        self.all_expanded
            || (iso_year == self.current_iso_year && week_number == self.current_week)
    }
}

/// Whether a week section inside a month starts expanded.
///
/// `week_number` is taken to be in today's ISO year.
pub fn default_expanded(today: NaiveDate, week_number: u32, month: MonthName) -> bool {
    let ctx = ViewContext::for_today(today, false);
    ctx.month_expanded(month) && ctx.week_expanded(ctx.current_iso_year, week_number)
}
