//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tl_core::{MonthName, SortOrder};

/// Time logs kept inside Markdown notes.
///
/// Reads fenced `time-log` blocks, totals them by day, week and month, and
/// adds entries by rewriting only the block.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// The block to operate on.
#[derive(Debug, Clone, Args)]
pub struct BlockArgs {
    /// Markdown file holding the time log.
    pub file: PathBuf,

    /// Which time-log block in the file, counting from 0.
    #[arg(short, long, default_value_t = 0)]
    pub block: usize,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the time-log blocks in a file.
    Blocks {
        /// Markdown file to scan.
        file: PathBuf,
    },

    /// Show a block's months, weeks, days and entries with totals.
    Show {
        #[command(flatten)]
        target: BlockArgs,

        /// Week and day order (asc or desc). Defaults to the configured order.
        #[arg(long)]
        order: Option<SortOrder>,

        /// Expand every month and week.
        #[arg(short, long)]
        all: bool,

        /// Day to treat as today (DD-MM-YYYY).
        #[arg(long, hide = true)]
        today: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Add an entry to a block.
    Add {
        #[command(flatten)]
        target: BlockArgs,

        /// Date of the entry (DD-MM-YYYY or YYYY-MM-DD).
        #[arg(long)]
        date: String,

        /// Start time (HH:MM).
        #[arg(long)]
        from: String,

        /// End time (HH:MM).
        #[arg(long)]
        to: String,

        /// Break, e.g. 30m or 1.5h.
        #[arg(long = "break")]
        break_time: Option<String>,

        /// Free-text note.
        #[arg(long)]
        note: Option<String>,
    },

    /// Print the report table for one month.
    Report {
        #[command(flatten)]
        target: BlockArgs,

        /// Month section to report on, e.g. June.
        #[arg(short, long)]
        month: MonthName,

        /// Week and row order (asc or desc). Defaults to the configured order.
        #[arg(long)]
        order: Option<SortOrder>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
