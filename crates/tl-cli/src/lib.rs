//! Time-log CLI library.
//!
//! This crate provides the `tl` command over time logs kept in Markdown
//! notes.

mod cli;
pub mod commands;
mod config;

pub use cli::{BlockArgs, Cli, Commands};
pub use config::Config;
