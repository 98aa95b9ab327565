//! Storage layer for time logs embedded in Markdown documents.
//!
//! A time log lives in a fenced code block of a host document. This crate
//! finds those blocks, decodes their YAML into [`tl_core::LogDocument`], and
//! writes edited documents back by replacing only the block body.
//!
//! # Round trip
//!
//! [`BlockUpdater::save`] runs read, locate, encode, splice and write in that
//! order against a [`DocumentStore`]. The document is read fresh for every
//! save and never cached, so edits made elsewhere in the file between load and
//! save are kept. When two writers race on the same file the last write wins.
//!
//! Within one process, [`BlockRegistry`] hands out one lease per block so a
//! second save of the same block fails with [`StoreError::Busy`] instead of
//! interleaving with the first.

pub mod codec;
pub mod locate;
pub mod registry;
pub mod splice;
pub mod store;
pub mod updater;

pub use codec::{DecodeError, LogBlock, decode_block, encode_block};
pub use locate::{BlockSpan, block_body, locate_blocks};
pub use registry::{BlockHandle, BlockLease, BlockRegistry};
pub use splice::{SpliceError, update_block};
pub use store::{DocumentStore, FsStore, StoreError};
pub use updater::{BlockUpdater, SaveOutcome};
