//! `tl report`: the report table for one month.
//!
//! Text output prints one table per ISO week with shared column widths,
//! followed by the month total. `--json` emits the report structure as is.

use std::fmt::Write;

use anyhow::{Result, bail};
use tl_core::{MonthName, MonthReport, ReportRow, SortOrder, month_report};
use tl_store::BlockHandle;

use super::util::{load_block, updater};
use crate::Config;

const COLUMN_GAP: &str = "  ";

fn column_widths(report: &MonthReport) -> [usize; 6] {
    let mut widths = report.header.map(|h| h.chars().count());
    for row in report.weeks.iter().flat_map(|w| &w.rows) {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn format_line(cells: [&str; 6], widths: &[usize; 6]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter().copied()).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        write!(line, "{cell:<width$}").unwrap();
    }
    line.trim_end().to_string()
}

fn format_row(row: &ReportRow, widths: &[usize; 6]) -> String {
    format_line(row.cells(), widths)
}

/// Formats a month report as plain-text tables.
pub fn format_report(report: &MonthReport) -> String {
    let mut output = String::new();
    let widths = column_widths(report);

    writeln!(output, "{}: {}", report.project, report.month).unwrap();
    match &report.period {
        Some(period) => writeln!(output, "Period: {} to {}", period.from, period.to).unwrap(),
        None => writeln!(output, "Period: -").unwrap(),
    }

    if report.weeks.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No entries.").unwrap();
    }

    for week in &report.weeks {
        writeln!(output).unwrap();
        writeln!(output, "Week {}  {}", week.week_number, week.total).unwrap();
        writeln!(output, "{}", format_line(report.header, &widths)).unwrap();
        for row in &week.rows {
            writeln!(output, "{}", format_row(row, &widths)).unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "Total: {}", report.total).unwrap();
    output
}

pub fn run(
    config: &Config,
    handle: &BlockHandle,
    month: MonthName,
    order: Option<SortOrder>,
    json: bool,
) -> Result<()> {
    let updater = updater(config);
    let block = load_block(&updater, handle)?;

    let Some(report) = month_report(&block.document, month, order.unwrap_or(config.order)) else {
        bail!("block {handle} has no {month} section");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}
