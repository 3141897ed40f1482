//! # Domain Module
//!
//! Core domain types for the sealed-bid name auction: value objects, the
//! hashing adapter, ledger snapshots, bids, phases and invariants.
//! No I/O and no async here.

pub mod entities;
pub mod errors;
pub mod hashing;
pub mod invariants;
pub mod phase;
pub mod secret;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use hashing::{keccak256, keccak256_hex, name_identifier, prefixed_hex};
pub use invariants::*;
pub use phase::*;
pub use secret::BidSecret;
pub use value_objects::*;
