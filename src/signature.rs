use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rolling::Adler32;
use crate::{DEFAULT_BLOCK_SIZE, SyncError, SyncResult, strong_digest};

/// Weak and strong checksums of one source block.
///
/// A signature table is a `Vec<BlockSignature>` in source order; the
/// position in that vector is the authoritative block identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSignature {
    /// Adler-32 style weak sum of the block.
    pub weak: u32,
    /// Lowercase hex BLAKE3 digest of the block.
    pub strong: String,
}

/// Split `reader` into [`DEFAULT_BLOCK_SIZE`] blocks and checksum each one.
///
/// # Errors
/// Propagates reader failures; end of stream is the normal terminator.
pub fn build_signatures<R: Read>(reader: R) -> SyncResult<Vec<BlockSignature>> {
    build_signatures_with_block_size(reader, DEFAULT_BLOCK_SIZE)
}

/// Split `reader` into `block_size` blocks and checksum each one.
///
/// The trailing block covers exactly the bytes read, with no padding,
/// so it may be shorter than `block_size`. A short trailing block can
/// never fill the scanner's fixed window and will come back `missing`
/// from the integrity pass even when the target ends with those bytes.
///
/// # Errors
/// Propagates reader failures; end of stream is the normal terminator.
///
/// # Panics
/// Panics if `block_size` is zero.
pub fn build_signatures_with_block_size<R: Read>(
    mut reader: R,
    block_size: usize,
) -> SyncResult<Vec<BlockSignature>> {
    assert!(block_size > 0, "block size must be positive");

    let mut signatures = Vec::new();
    let mut block = Vec::with_capacity(block_size);

    loop {
        // A bounded take turns "read one block" into a plain read-to-end;
        // short reads and interrupts are absorbed on the way.
        block.clear();
        let bytes_read = reader
            .by_ref()
            .take(block_size as u64)
            .read_to_end(&mut block)?;
        if bytes_read == 0 {
            break;
        }

        signatures.push(BlockSignature {
            weak: Adler32::compute(&block),
            strong: strong_digest(&block),
        });
    }

    debug!(blocks = signatures.len(), block_size, "signature table built");
    Ok(signatures)
}

/// Persist a signature table to `writer` in its binary form.
///
/// Decoding what this writes yields a table equal to `signatures`,
/// field-wise and in order.
///
/// # Errors
/// Returns [`SyncError::EmptySignatures`] for an empty table and
/// [`SyncError::Encode`] when the encoder or the underlying writer
/// fails.
pub fn write_signatures<W: Write>(writer: W, signatures: &[BlockSignature]) -> SyncResult<()> {
    if signatures.is_empty() {
        return Err(SyncError::EmptySignatures);
    }

    bincode::serialize_into(writer, signatures).map_err(SyncError::Encode)
}

/// Read back a signature table produced by [`write_signatures`].
///
/// # Errors
/// Returns [`SyncError::Decode`] when the payload is not a valid
/// encoding of a signature table; no partially populated table is ever
/// returned.
pub fn read_signatures<R: Read>(reader: R) -> SyncResult<Vec<BlockSignature>> {
    let signatures: Vec<BlockSignature> = bincode::deserialize_from(reader)?;
    Ok(signatures)
}
