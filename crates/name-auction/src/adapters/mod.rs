//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the outbound ports: an in-process registrar ledger for
//! tests and simulation, and the default label normalizer.

mod in_memory_registrar;
mod normalizer;

pub use in_memory_registrar::{InMemoryRegistrar, WriteCall, AUCTION_LENGTH_SECS};
pub use normalizer::LabelNormalizer;
