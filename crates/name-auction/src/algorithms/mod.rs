//! # Algorithms Module
//!
//! Sealed-bid commitment encoding and decoy batch construction.

pub mod commitment;
pub mod decoy;

pub use commitment::{seal_bid, seal_commitment, verify_bid, COMMITMENT_PREIMAGE_LEN};
pub use decoy::{decoy_batch, target_position, AuctionBatch, DECOY_BATCH_SIZE};
