//! `tl show`: the month, week, day and entry tree of one block.
//!
//! Months and weeks start collapsed except the current ones, the same rule a
//! live view applies. `--all` expands everything.

use std::fmt::Write;

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use tl_core::{
    DayLog, LogDocument, MonthName, Period, SortOrder, ViewContext, entry_status, format_minutes,
    group_weeks, month_total,
};
use tl_store::BlockHandle;

use super::util::{load_block, resolve_today, updater};
use crate::Config;

#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub from: String,
    pub to: String,
    #[serde(rename = "break")]
    pub break_time: Option<String>,
    pub note: Option<String>,
    /// Contribution to the totals.
    pub minutes: i64,
    /// Formatted duration, `Invalid` or `Negative/Zero`.
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: String,
    pub total_minutes: i64,
    pub total: String,
    pub entries: Vec<EntryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
    pub iso_year: i32,
    pub week_number: u32,
    pub expanded: bool,
    pub total_minutes: i64,
    pub total: String,
    pub days: Vec<DayView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthView {
    pub month: MonthName,
    pub expanded: bool,
    pub total_minutes: i64,
    pub total: String,
    pub weeks: Vec<WeekView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowData {
    pub project: String,
    pub period: Period,
    pub months: Vec<MonthView>,
}

/// Summarizes every month of a document.
pub fn build_show(doc: &LogDocument, ctx: &ViewContext, order: SortOrder) -> ShowData {
    let months = doc
        .months_ordered(order)
        .par_iter()
        .map(|(month, days)| summarize_month(*month, days, ctx, order))
        .collect();

    ShowData {
        project: doc.project.clone(),
        period: doc.period.clone(),
        months,
    }
}

fn summarize_month(month: MonthName, days: &DayLog, ctx: &ViewContext, order: SortOrder) -> MonthView {
    let weeks = group_weeks(days, order)
        .into_iter()
        .map(|week| {
            let days = week
                .days
                .iter()
                .map(|day| {
                    let entries = day
                        .entries
                        .iter()
                        .map(|entry| {
                            let status = entry_status(day.date, entry);
                            EntryView {
                                from: entry.from.clone(),
                                to: entry.to.clone(),
                                break_time: entry.break_time.clone(),
                                note: entry.note.clone(),
                                minutes: status.contribution(),
                                status: status.label(),
                            }
                        })
                        .collect();
                    let total_minutes = day.total_minutes();
                    DayView {
                        date: day.date_key.to_string(),
                        total_minutes,
                        total: format_minutes(total_minutes),
                        entries,
                    }
                })
                .collect();
            let total_minutes = week.total_minutes();
            WeekView {
                iso_year: week.iso_year,
                week_number: week.week_number,
                expanded: ctx.week_expanded(week.iso_year, week.week_number),
                total_minutes,
                total: format_minutes(total_minutes),
                days,
            }
        })
        .collect();

    let total_minutes = month_total(days);
    MonthView {
        month,
        expanded: ctx.month_expanded(month),
        total_minutes,
        total: format_minutes(total_minutes),
        weeks,
    }
}

fn marker(expanded: bool) -> &'static str {
    if expanded { "[-]" } else { "[+]" }
}

/// Formats the tree as indented text.
pub fn format_show(data: &ShowData) -> String {
    let mut output = String::new();

    writeln!(output, "{}", data.project).unwrap();
    writeln!(
        output,
        "Period: {} to {}",
        data.period.from, data.period.to
    )
    .unwrap();
    writeln!(output).unwrap();

    if data.months.is_empty() {
        writeln!(output, "No months recorded.").unwrap();
        return output;
    }

    for month in &data.months {
        writeln!(
            output,
            "{} {}  {}",
            marker(month.expanded),
            month.month,
            month.total
        )
        .unwrap();
        if !month.expanded {
            continue;
        }
        for week in &month.weeks {
            writeln!(
                output,
                "    {} Week {}  {}",
                marker(week.expanded),
                week.week_number,
                week.total
            )
            .unwrap();
            if !week.expanded {
                continue;
            }
            for day in &week.days {
                writeln!(output, "        {}  {}", day.date, day.total).unwrap();
                for entry in &day.entries {
                    let mut line = format!("            {}-{}", entry.from, entry.to);
                    if let Some(brk) = &entry.break_time {
                        write!(line, "  break {brk}").unwrap();
                    }
                    write!(line, "  {}", entry.status).unwrap();
                    if let Some(note) = &entry.note {
                        write!(line, "  {note}").unwrap();
                    }
                    writeln!(output, "{line}").unwrap();
                }
            }
        }
    }

    output
}

pub fn run(
    config: &Config,
    handle: &BlockHandle,
    order: Option<SortOrder>,
    all: bool,
    today: Option<&str>,
    json: bool,
) -> Result<()> {
    let today = resolve_today(today)?;
    let updater = updater(config);
    let block = load_block(&updater, handle)?;

    let ctx = ViewContext::for_today(today, all);
    let data = build_show(&block.document, &ctx, order.unwrap_or(config.order));

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print!("{}", format_show(&data));
    }
    Ok(())
}
