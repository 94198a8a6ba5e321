use serde::{Deserialize, Serialize};

use crate::delta::Delta;

/// One step of an ordered delta stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaOp {
    /// Copy `length` bytes of the source starting at `offset`.
    Copy { offset: u64, length: usize },
    /// Insert the bytes verbatim.
    Literal(Vec<u8>),
}

/// Project a per-block delta map into an ordered command stream.
///
/// Entries are walked in ascending source block order. Missing blocks
/// contribute nothing, each non-empty literal run lands immediately
/// before the block it precedes, and consecutive blocks that continue
/// the same source range collapse into a single copy.
#[must_use]
pub fn delta_commands(delta: &Delta, block_size: usize) -> Vec<DeltaOp> {
    let mut indices: Vec<usize> = delta.keys().copied().collect();
    indices.sort_unstable();

    let mut commands = Vec::new();
    // Copy run still being extended, as (source offset, length).
    let mut run: Option<(u64, usize)> = None;

    for index in indices {
        let entry = &delta[&index];
        if entry.missing {
            continue;
        }

        let block_start = (index * block_size) as u64;
        let continues = entry.lit.is_empty()
            && run.is_some_and(|(offset, length)| offset + length as u64 == block_start);

        if continues {
            if let Some((_, length)) = run.as_mut() {
                *length += block_size;
            }
        } else {
            if let Some((offset, length)) = run.take() {
                commands.push(DeltaOp::Copy { offset, length });
            }
            if !entry.lit.is_empty() {
                commands.push(DeltaOp::Literal(entry.lit.clone()));
            }
            run = Some((block_start, block_size));
        }
    }

    if let Some((offset, length)) = run {
        commands.push(DeltaOp::Copy { offset, length });
    }
    commands
}
