//! Reading and writing host documents.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::codec::DecodeError;
use crate::locate::{BlockSpan, locate_blocks};
use crate::registry::BlockHandle;
use crate::splice::SpliceError;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The host file does not exist.
    #[error("source file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The block cannot be found in the current document text.
    #[error("could not locate block {handle} in the current document")]
    PositionUnavailable { handle: BlockHandle },

    /// Another update of the same block is in flight.
    #[error("block {handle} is already being updated")]
    Busy { handle: BlockHandle },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode time log: {0}")]
    Encode(#[from] serde_yaml::Error),

    #[error("failed to decode time log: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Splice(#[from] SpliceError),
}

/// Access to host documents.
pub trait DocumentStore {
    /// Returns the full current text of the document at `path`.
    fn read(&self, path: &Path) -> Result<String, StoreError>;

    /// Returns the current line span of the block in `document`.
    fn locate(&self, handle: &BlockHandle, document: &str) -> Option<BlockSpan>;

    /// Replaces the document at `path` with `text`.
    fn write(&self, path: &Path, text: &str) -> Result<(), StoreError>;
}

/// Documents on the local filesystem.
///
/// Blocks are identified by their position among fences tagged with the
/// configured language.
#[derive(Debug, Clone)]
pub struct FsStore {
    language: String,
}

impl FsStore {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    /// All block spans of the configured language in `document`.
    pub fn spans(&self, document: &str) -> Vec<BlockSpan> {
        locate_blocks(document, &self.language)
    }
}

impl DocumentStore for FsStore {
    fn read(&self, path: &Path) -> Result<String, StoreError> {
        fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                StoreError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })
    }

    fn locate(&self, handle: &BlockHandle, document: &str) -> Option<BlockSpan> {
        self.spans(document).get(handle.index).copied()
    }

    /// Writes through a temporary file in the same directory and renames it
    /// over the target, so readers never see a partial document.
    fn write(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let write_failed = |source: io::Error| StoreError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
        tmp.write_all(text.as_bytes()).map_err(write_failed)?;
        tmp.as_file().sync_all().map_err(write_failed)?;
        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), meta.permissions()).map_err(write_failed)?;
        }
        tmp.persist(path).map_err(|e| write_failed(e.error))?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "wrote document");
        Ok(())
    }
}
