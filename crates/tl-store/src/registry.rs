//! Tracking which blocks have an update in flight.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::store::StoreError;

/// Identifies a block: the host file and the block's position among the
/// file's time-log blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    pub path: PathBuf,
    pub index: usize,
}

impl BlockHandle {
    pub fn new(path: impl Into<PathBuf>, index: usize) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for BlockHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.path.display(), self.index)
    }
}

/// Set of blocks currently being updated.
///
/// Cloning shares the underlying set.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    active: Arc<Mutex<HashSet<BlockHandle>>>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `handle` as being updated.
    ///
    /// Fails with [`StoreError::Busy`] if another lease for the same block is
    /// still alive.
    pub fn acquire(&self, handle: &BlockHandle) -> Result<BlockLease, StoreError> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if !active.insert(handle.clone()) {
            return Err(StoreError::Busy {
                handle: handle.clone(),
            });
        }
        Ok(BlockLease {
            handle: handle.clone(),
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_active(&self, handle: &BlockHandle) -> bool {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(handle)
    }

    pub fn active_count(&self) -> usize {
        self.active.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Exclusive claim on one block. Released on drop.
#[derive(Debug)]
pub struct BlockLease {
    handle: BlockHandle,
    active: Arc<Mutex<HashSet<BlockHandle>>>,
}

impl BlockLease {
    pub fn handle(&self) -> &BlockHandle {
        &self.handle
    }

    pub fn release(self) {
        drop(self);
    }
}

impl Drop for BlockLease {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.handle);
    }
}
