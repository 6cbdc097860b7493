use std::collections::HashSet;

use crate::SignedTx;

/// Blobs that a node has already accepted. Grows for the life of the process
/// and is never pruned, so a blob that reappears after a reload stays skipped.
#[derive(Debug, Default, Clone)]
pub struct SubmittedSet {
    txs: HashSet<SignedTx>,
}

impl SubmittedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, signed_tx: &str) -> bool {
        self.txs.contains(signed_tx)
    }

    /// Returns `false` if the blob was already recorded.
    pub fn insert(&mut self, signed_tx: SignedTx) -> bool {
        self.txs.insert(signed_tx)
    }

    pub fn len(&self) -> usize {
        self.txs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }
}

