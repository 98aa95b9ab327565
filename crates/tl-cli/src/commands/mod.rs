//! CLI subcommand implementations.

pub mod add;
pub mod blocks;
pub mod report;
pub mod show;
pub mod util;
