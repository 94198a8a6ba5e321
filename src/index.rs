use std::collections::HashMap;

use crate::signature::BlockSignature;
use crate::strong_digest;

/// Two-level lookup from weak sum to strong digest to source block index.
///
/// When the same `(weak, strong)` pair describes several source blocks,
/// the last inserted position wins: the index resolves content to *some*
/// source block that carries it, not to all of them.
#[derive(Clone, Debug, Default)]
pub struct BlockIndex {
    weak_to_strong: HashMap<u32, HashMap<String, usize>>,
}

impl BlockIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `block_index` under `(weak, strong)`.
    pub fn insert(&mut self, weak: u32, strong: String, block_index: usize) {
        self.weak_to_strong
            .entry(weak)
            .or_default()
            .insert(strong, block_index);
    }

    /// First-level probe; no strong digest is computed.
    #[must_use]
    pub fn contains_weak(&self, weak: u32) -> bool {
        self.weak_to_strong.contains_key(&weak)
    }

    /// Resolve a window to a source block index.
    ///
    /// The weak sum gates the probe: a first-level miss is the fast
    /// common case and costs no strong digest. On a weak hit the window
    /// digest must also match, otherwise this is a checksum collision
    /// and the probe comes back empty.
    #[must_use]
    pub fn seek(&self, weak: u32, window: &[u8]) -> Option<usize> {
        let strongs = self.weak_to_strong.get(&weak)?;
        strongs.get(&strong_digest(window)).copied()
    }

    /// Number of distinct `(weak, strong)` pairs held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weak_to_strong.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weak_to_strong.is_empty()
    }
}

/// Index a signature table for scanning.
///
/// Walks the table in order, so for duplicated `(weak, strong)` pairs
/// the later block index overwrites the earlier one.
#[must_use]
pub fn build_indexes(signatures: &[BlockSignature]) -> BlockIndex {
    let mut indexes = BlockIndex::new();
    for (block_index, signature) in signatures.iter().enumerate() {
        indexes.insert(signature.weak, signature.strong.clone(), block_index);
    }
    indexes
}
