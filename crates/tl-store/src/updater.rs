//! Loading a block and writing it back in place.

use crate::codec::{LogBlock, decode_block, encode_block};
use crate::locate::block_body;
use crate::registry::{BlockHandle, BlockRegistry};
use crate::splice::update_block;
use crate::store::{DocumentStore, StoreError};

/// Outcome of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The document was rewritten.
    Written,
    /// The encoded block matched the document already; nothing was written.
    Unchanged,
}

/// Round-trips blocks between a [`DocumentStore`] and the typed model.
///
/// Each save reads the document fresh, re-locates the block, encodes the new
/// body, splices it in and writes the result. A lease in the registry keeps a
/// second save of the same block from starting before the first finishes.
#[derive(Debug, Clone)]
pub struct BlockUpdater<S> {
    store: S,
    registry: BlockRegistry,
}

impl<S: DocumentStore> BlockUpdater<S> {
    pub fn new(store: S) -> Self {
        Self::with_registry(store, BlockRegistry::new())
    }

    pub const fn with_registry(store: S, registry: BlockRegistry) -> Self {
        Self { store, registry }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    /// Returns the current body text of a block.
    pub fn source(&self, handle: &BlockHandle) -> Result<String, StoreError> {
        let document = self.store.read(handle.path())?;
        let span = self.store.locate(handle, &document).ok_or_else(|| {
            StoreError::PositionUnavailable {
                handle: handle.clone(),
            }
        })?;
        block_body(&document, span).ok_or_else(|| StoreError::PositionUnavailable {
            handle: handle.clone(),
        })
    }

    /// Reads and decodes a block.
    pub fn load(&self, handle: &BlockHandle) -> Result<LogBlock, StoreError> {
        let source = self.source(handle)?;
        Ok(decode_block(&source)?)
    }

    /// Encodes `block` and writes it over the block at `handle`.
    ///
    /// Nothing outside the block changes. On failure the document on disk is
    /// left as it was and the error is logged before being returned.
    pub fn save(&self, handle: &BlockHandle, block: &LogBlock) -> Result<SaveOutcome, StoreError> {
        let lease = self.registry.acquire(handle)?;
        let result = self.write_back(handle, block);
        lease.release();

        match &result {
            Ok(SaveOutcome::Written) => {
                tracing::info!(block = %handle, "saved time log");
            }
            Ok(SaveOutcome::Unchanged) => {
                tracing::debug!(block = %handle, "time log unchanged");
            }
            Err(error) => {
                tracing::error!(block = %handle, %error, "failed to save time log");
            }
        }
        result
    }

    fn write_back(&self, handle: &BlockHandle, block: &LogBlock) -> Result<SaveOutcome, StoreError> {
        let document = self.store.read(handle.path())?;
        let span = self.store.locate(handle, &document).ok_or_else(|| {
            StoreError::PositionUnavailable {
                handle: handle.clone(),
            }
        })?;
        let body = encode_block(block)?;
        let updated = update_block(&document, span, &body)?;
        if updated == document {
            return Ok(SaveOutcome::Unchanged);
        }
        self.store.write(handle.path(), &updated)?;
        Ok(SaveOutcome::Written)
    }
}
