//! # Ports Module
//!
//! Inbound (API) and outbound (ledger, normalizer, clock) traits.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
