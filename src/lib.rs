//! rsync-style block matching over byte streams.
//!
//! The source is split into fixed-size blocks and summarised by a
//! signature table of `(weak, strong)` checksum pairs. The target is
//! then streamed through a rolling weak checksum; whenever the window
//! checksum hits the two-level index and the BLAKE3 digest confirms it,
//! a source block has been found in the target. Everything between
//! matches is carried as literal bytes, and source blocks that never
//! match are marked missing, so the resulting delta holds exactly one
//! entry per source block.
//!
//! ```
//! use rollsync::{build_signatures_with_block_size, generate_delta_with_block_size};
//!
//! let source = b"i am here guys how are you doing this is a small test";
//! let target = b"i am here guys how are you doing and this is a small test";
//!
//! let signatures = build_signatures_with_block_size(&source[..], 16)?;
//! let delta = generate_delta_with_block_size(&target[..], &signatures, 16)?;
//! assert_eq!(delta.len(), signatures.len());
//! # Ok::<(), rollsync::SyncError>(())
//! ```

pub mod delta;
pub mod index;
pub mod ops;
pub mod rolling;
pub mod signature;

use thiserror::Error;

pub use delta::{BlockDelta, Delta, generate_delta, generate_delta_with_block_size};
pub use index::{BlockIndex, build_indexes};
pub use ops::{DeltaOp, delta_commands};
pub use rolling::{Adler32, EmptyWindow};
pub use signature::{
    BlockSignature, build_signatures, build_signatures_with_block_size, read_signatures,
    write_signatures,
};

/// Block size used by the convenience entry points.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Errors surfaced by signature building, persistence, and delta scanning.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reader or writer failure, propagated verbatim. End-of-stream is a
    /// normal terminator, never an error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Rolled out of an empty checksum window.
    #[error(transparent)]
    EmptyWindow(#[from] EmptyWindow),
    /// Refused to persist a signature table with no entries.
    #[error("no signatures to write")]
    EmptySignatures,
    /// The persisted signature form could not be written out.
    #[error("signature encode failed: {0}")]
    Encode(bincode::Error),
    /// The persisted signature form failed to parse; no partial table is
    /// ever returned.
    #[error("signature decode failed: {0}")]
    Decode(#[from] bincode::Error),
}

/// Shorthand for results carrying a [`SyncError`].
pub type SyncResult<T> = Result<T, SyncError>;

/// Lowercase hex BLAKE3 digest of a block; serves as the inner key of
/// the two-level index and must be shared by the signature producer and
/// the delta consumer.
#[inline]
#[must_use]
pub fn strong_digest(block: &[u8]) -> String {
    blake3::hash(block).to_hex().to_string()
}
