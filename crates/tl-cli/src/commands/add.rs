//! `tl add`: add an entry and write the block back in place.

use anyhow::{Context, Result};
use tl_core::{NewEntry, add_entry, entry_status};
use tl_store::BlockHandle;

use super::util::{acquire_lock, load_block, updater};
use crate::Config;

/// Validates the entry, adds it to the block, and saves the block.
///
/// The cross-process lock is held from the read through the write, so two
/// concurrent `tl add` runs cannot drop each other's entries.
pub fn run(config: &Config, handle: &BlockHandle, entry: &NewEntry) -> Result<()> {
    let validated = entry.validate()?;

    let _lock = acquire_lock(&config.lock_path)?;
    let updater = updater(config);
    let block = load_block(&updater, handle)?;

    let document = add_entry(&block.document, entry)?;
    let outcome = updater
        .save(handle, &block.with_document(document))
        .with_context(|| format!("failed to save block {handle}"))?;
    tracing::debug!(?outcome, block = %handle, "saved block");

    println!(
        "Added {}-{} on {} ({})",
        validated.entry.from,
        validated.entry.to,
        validated.date_key,
        entry_status(validated.date, &validated.entry)
    );
    Ok(())
}
