//! # Name Auction
//!
//! Client library for sealed-bid (Vickrey) auctions of namespace entries,
//! settled by an external registrar ledger.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Protocol
//!
//! 1. `open_auction` starts the target name hidden in a batch of ten
//!    identifiers, nine of them random decoys.
//! 2. `submit_bid` publishes a sealed commitment together with a deposit that
//!    covers the hidden bid value.
//! 3. `reveal_bid` discloses the plaintext during the final day before the
//!    registration deadline.
//! 4. `finalize_auction` lets the registrar settle at the second-highest price.
//!
//! ## Phases
//!
//! | Phase | Condition |
//! |-------|-----------|
//! | `Invalid` / `CanInvalidate` | name below the minimum length |
//! | `OpenForAuction` | status `Open` |
//! | `Auction` | more than 24h before the deadline |
//! | `Reveal` | last 24h before the deadline |
//! | `Finalize` | up to 24h after the deadline |
//! | `FinalizeOpen` | more than 24h after the deadline |
//! | `Owned` | status `Owned` |
//!
//! ## Module Structure
//!
//! ```text
//! name-auction/
//! ├── domain/          # Entry, Deed, Bid, phases, hashing, errors
//! ├── algorithms/      # Commitment encoding, decoy batches
//! ├── ports/           # NameAuctionApi, RegistrarLedger, NameNormalizer
//! ├── adapters/        # InMemoryRegistrar, LabelNormalizer
//! ├── config.rs        # AuctionConfig
//! └── service.rs       # NameAuctionClient -> NameAuctionService
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use name_auction::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), AuctionError> {
//! let ledger = Arc::new(InMemoryRegistrar::new("eth", Address::new([0xEE; 20])));
//! let service = NameAuctionClient::new(AuctionConfig::default(), ledger)
//!     .connect()
//!     .await?;
//!
//! let bidder = Address::new([0x11; 20]);
//! service.open_auction("foobarbaz", TxParams::from_account(bidder)).await?;
//!
//! let bid = service
//!     .build_bid("foobarbaz", bidder, U256::from(100), BidSecret::random())
//!     .await?;
//! service
//!     .submit_bid(&bid, TxParams::from_account(bidder).with_value(U256::from(150)))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{InMemoryRegistrar, LabelNormalizer, WriteCall};
    pub use crate::algorithms::{
        decoy_batch, seal_bid, seal_commitment, target_position, verify_bid, AuctionBatch,
        DECOY_BATCH_SIZE,
    };
    pub use crate::config::AuctionConfig;
    pub use crate::domain::{
        entry_phase, keccak256, name_identifier, Address, AuctionError, Bid, BidSecret, Deed,
        Entry, EntryRecord, EntryStatus, Hash, LedgerError, NormalizationError, Phase, Timestamp,
        TxHandle, TxParams, PHASE_WINDOW_SECS, U256,
    };
    pub use crate::ports::{
        DeedInfo, FixedTimeSource, NameAuctionApi, NameNormalizer, RegistrarLedger,
        SystemTimeSource, TimeSource,
    };
    pub use crate::service::{NameAuctionClient, NameAuctionService};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
