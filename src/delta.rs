use std::collections::HashMap;
use std::io::{BufReader, ErrorKind, Read};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::index::build_indexes;
use crate::rolling::Adler32;
use crate::signature::BlockSignature;
use crate::{DEFAULT_BLOCK_SIZE, SyncResult};

/// Difference between the target and one source block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDelta {
    /// Source byte offset where the block begins.
    pub start: usize,
    /// Source byte offset one past the block end.
    pub offset: usize,
    /// The source block was not found anywhere in the target.
    pub missing: bool,
    /// Literal target bytes that sit between the previous match and this
    /// block's match; empty when the block follows the previous match
    /// verbatim.
    pub lit: Vec<u8>,
}

/// Per-block difference map keyed by source block index. After the
/// integrity pass every source block index is present exactly once.
pub type Delta = HashMap<usize, BlockDelta>;

/// Scan `target` against `signatures` using [`DEFAULT_BLOCK_SIZE`].
///
/// # Errors
/// Propagates reader failures.
pub fn generate_delta<R: Read>(target: R, signatures: &[BlockSignature]) -> SyncResult<Delta> {
    generate_delta_with_block_size(target, signatures, DEFAULT_BLOCK_SIZE)
}

/// Scan `target` one byte at a time and map every source block to a
/// [`BlockDelta`].
///
/// The rolling window fills to `block_size` and then slides one byte per
/// step; each byte that slides out joins the pending literal run. A
/// window whose weak sum hits the index and whose strong digest confirms
/// it is a match: the pending literals attach to that block's entry and
/// the window restarts from empty, so matches are greedy, left-to-right
/// and non-overlapping. A later match for the same source index
/// overwrites the earlier entry.
///
/// Literal bytes still pending at end of input are discarded; callers
/// reconstructing the exact target own that residue. Source blocks the
/// scan never matched are filled in as `missing`.
///
/// `block_size` must equal the size the signature table was built with.
///
/// # Errors
/// Propagates reader failures; end of stream is the normal terminator.
///
/// # Panics
/// Panics if `block_size` is zero.
pub fn generate_delta_with_block_size<R: Read>(
    target: R,
    signatures: &[BlockSignature],
    block_size: usize,
) -> SyncResult<Delta> {
    assert!(block_size > 0, "block size must be positive");

    let indexes = build_indexes(signatures);
    let mut hasher = Adler32::new();
    let mut literals: Vec<u8> = Vec::new();
    let mut delta = Delta::new();

    for byte in BufReader::new(target).bytes() {
        let byte = match byte {
            Ok(byte) => byte,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        hasher.roll_in(byte);
        if hasher.count() < block_size {
            // Still filling the very first window.
            continue;
        }
        if hasher.count() > block_size {
            // The byte sliding out of the saturated window belongs to no
            // match; it becomes part of the pending literal run.
            literals.push(hasher.roll_out()?);
        }

        if let Some(index) = indexes.seek(hasher.sum(), hasher.window()) {
            trace!(block = index, literals = literals.len(), "matched source block");
            delta.insert(
                index,
                BlockDelta {
                    start: index * block_size,
                    offset: index * block_size + block_size,
                    missing: false,
                    lit: std::mem::take(&mut literals),
                },
            );
            hasher.reset();
        }
    }

    let matched = delta.len();
    fill_missing(&mut delta, signatures.len(), block_size);
    debug!(
        blocks = signatures.len(),
        matched,
        missing = signatures.len() - matched,
        "delta scan finished"
    );
    Ok(delta)
}

/// Integrity pass: placeholder entries for source blocks the scan never
/// matched, so the delta covers every source block index exactly once.
fn fill_missing(delta: &mut Delta, blocks: usize, block_size: usize) {
    for index in 0..blocks {
        delta.entry(index).or_insert_with(|| BlockDelta {
            start: index * block_size,
            offset: index * block_size + block_size,
            missing: true,
            lit: Vec::new(),
        });
    }
}
