//! Shared utilities for CLI commands.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fs2::FileExt;
use tl_core::parse_date;
use tl_store::{BlockHandle, BlockUpdater, FsStore, LogBlock, StoreError};

use crate::Config;

/// Builds an updater over the filesystem for the configured block language.
pub fn updater(config: &Config) -> BlockUpdater<FsStore> {
    BlockUpdater::new(FsStore::new(config.block_language.clone()))
}

/// Loads and decodes a block.
///
/// A decode failure carries the block's source text so the user can see
/// what failed to parse.
pub fn load_block(updater: &BlockUpdater<FsStore>, handle: &BlockHandle) -> Result<LogBlock> {
    match updater.load(handle) {
        Ok(block) => Ok(block),
        Err(StoreError::Decode(err)) => {
            let source = updater.source(handle).unwrap_or_default();
            Err(anyhow::Error::new(err).context(format!(
                "failed to decode time log in block {handle}:\n\n{source}\n"
            )))
        }
        Err(err) => Err(anyhow::Error::new(err).context(format!("failed to load block {handle}"))),
    }
}

/// Takes the exclusive cross-process lock for a read/modify/write cycle.
///
/// The lock is held until the returned file is dropped.
pub fn acquire_lock(lock_path: &Path) -> Result<File> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).context("failed to create lock directory")?;
    }
    let lock_file = File::create(lock_path).context("failed to create lock file")?;
    lock_file
        .lock_exclusive()
        .context("failed to acquire lock")?;
    Ok(lock_file)
}

/// Resolves the `--today` override, defaulting to the local date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(text) => {
            parse_date(text).with_context(|| format!("invalid date: {text} (expected DD-MM-YYYY)"))
        }
        None => Ok(Local::now().date_naive()),
    }
}
