//! Hard-coded checkpoint pins and chain-progress statistics.

use serde::{Deserialize, Serialize};

use crate::crypto::Hash;

/// Ordered height-to-hash pins used to reject deep alternate histories.
///
/// Heights are strictly increasing and height 0 is always present, mapped
/// to the genesis hash. Both are properties of compiled-in constants, so a
/// violation aborts construction rather than surfacing as a runtime error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Checkpoints {
    entries: Vec<(u32, Hash)>,
}

impl Checkpoints {
    /// Builds a checkpoint table, validating its ordering invariants.
    pub fn new(entries: Vec<(u32, Hash)>) -> Self {
        assert!(
            matches!(entries.first(), Some((0, _))),
            "checkpoint table must start at height 0"
        );
        assert!(
            entries.windows(2).all(|pair| pair[0].0 < pair[1].0),
            "checkpoint heights must be strictly increasing"
        );
        Checkpoints { entries }
    }

    /// Hash pinned at height 0.
    pub fn genesis_hash(&self) -> Hash {
        self.entries[0].1
    }

    /// The highest pinned entry.
    pub fn highest(&self) -> (u32, Hash) {
        *self.entries.last().expect("checkpoint table is never empty")
    }

    /// Hash pinned at the given height, if any.
    pub fn hash_at(&self, height: u32) -> Option<Hash> {
        self.entries
            .binary_search_by_key(&height, |(h, _)| *h)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Iterates over the pins in height order.
    pub fn iter(&self) -> impl Iterator<Item = &(u32, Hash)> {
        self.entries.iter()
    }

    /// Number of pins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; the table holds at least the genesis pin.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Chain-transaction snapshot used as a sync-progress heuristic.
///
/// Purely advisory; carries no consensus meaning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChainTxData {
    /// Unix timestamp of the last known transaction count.
    pub timestamp: u64,
    /// Total transactions between genesis and that timestamp.
    pub tx_count: u64,
    /// Estimated transactions per second after that timestamp.
    pub tx_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(n: u8) -> Hash {
        Hash::from_bytes([n; 32])
    }

    #[test]
    fn lookup_and_highest() {
        let table = Checkpoints::new(vec![(0, hash(1)), (1000, hash(2)), (2000, hash(3))]);
        assert_eq!(table.genesis_hash(), hash(1));
        assert_eq!(table.highest(), (2000, hash(3)));
        assert_eq!(table.hash_at(1000), Some(hash(2)));
        assert_eq!(table.hash_at(999), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn rejects_unsorted_heights() {
        Checkpoints::new(vec![(0, hash(1)), (2000, hash(2)), (1000, hash(3))]);
    }

    #[test]
    #[should_panic(expected = "height 0")]
    fn rejects_missing_genesis_pin() {
        Checkpoints::new(vec![(5, hash(1))]);
    }
}
