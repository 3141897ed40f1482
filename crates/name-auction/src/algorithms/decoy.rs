//! # Decoy Batches
//!
//! Auctions are started in batches of random identifiers with the real
//! target hidden at a uniformly random slot, so a watcher of the write cannot
//! tell which name the bidder cares about.

use crate::domain::Hash;
use rand::Rng;
use std::collections::HashSet;

/// Number of identifiers submitted per `start_auctions` write.
pub const DECOY_BATCH_SIZE: usize = 10;

/// One batch of identifiers for `start_auctions`.
pub type AuctionBatch = [Hash; DECOY_BATCH_SIZE];

/// Builds a batch of `DECOY_BATCH_SIZE` distinct identifiers containing
/// `target` exactly once.
pub fn decoy_batch<R: Rng>(target: Hash, rng: &mut R) -> AuctionBatch {
    let mut seen = HashSet::with_capacity(DECOY_BATCH_SIZE);
    seen.insert(target);

    let mut batch = [Hash::ZERO; DECOY_BATCH_SIZE];
    let target_slot = rng.gen_range(0..DECOY_BATCH_SIZE);

    for (slot, id) in batch.iter_mut().enumerate() {
        if slot == target_slot {
            *id = target;
            continue;
        }
        // Regenerate on the (astronomically unlikely) collision.
        *id = loop {
            let candidate = Hash::new(rng.gen());
            if seen.insert(candidate) {
                break candidate;
            }
        };
    }

    batch
}

/// Slot holding `target`, if present.
#[must_use]
pub fn target_position(batch: &AuctionBatch, target: &Hash) -> Option<usize> {
    batch.iter().position(|id| id == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::name_identifier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_batch_contains_target_once() {
        let target = name_identifier("foobarbaz");
        let batch = decoy_batch(target, &mut rand::thread_rng());
        assert_eq!(batch.len(), DECOY_BATCH_SIZE);
        assert_eq!(batch.iter().filter(|id| **id == target).count(), 1);
    }

    #[test]
    fn test_batch_entries_are_distinct() {
        let batch = decoy_batch(name_identifier("foobarbaz"), &mut rand::thread_rng());
        let unique: HashSet<_> = batch.iter().collect();
        assert_eq!(unique.len(), DECOY_BATCH_SIZE);
    }

    #[test]
    fn test_decoys_differ_between_calls() {
        let target = name_identifier("foobarbaz");
        let mut rng = rand::thread_rng();
        let a = decoy_batch(target, &mut rng);
        let b = decoy_batch(target, &mut rng);
        let decoys_a: HashSet<_> = a.iter().filter(|id| **id != target).collect();
        let decoys_b: HashSet<_> = b.iter().filter(|id| **id != target).collect();
        assert!(decoys_a.is_disjoint(&decoys_b));
    }

    #[test]
    fn test_target_slot_covers_every_position() {
        let target = name_identifier("foobarbaz");
        let mut rng = StdRng::seed_from_u64(7);
        let mut hits = [0usize; DECOY_BATCH_SIZE];
        for _ in 0..2_000 {
            let batch = decoy_batch(target, &mut rng);
            hits[target_position(&batch, &target).unwrap()] += 1;
        }
        // Uniform expectation is 200 per slot.
        assert!(hits.iter().all(|&n| n > 100), "skewed slots: {hits:?}");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let target = name_identifier("foobarbaz");
        let a = decoy_batch(target, &mut StdRng::seed_from_u64(1));
        let b = decoy_batch(target, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
