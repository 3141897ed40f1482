//! # Inbound Ports
//!
//! API trait defining what the name auction client can do.

use crate::domain::{Address, AuctionError, Bid, BidSecret, Deed, Entry, Phase, TxHandle, TxParams, U256};
use async_trait::async_trait;

/// Name auction API - inbound port.
///
/// Every protocol write (`open_auction`, `submit_bid`, `reveal_bid`,
/// `finalize_auction`) issues exactly one ledger transaction and is never
/// retried. Reads such as `get_entry` may combine several ledger reads.
/// Precondition failures are raised before any ledger call.
#[async_trait]
pub trait NameAuctionApi: Send + Sync {
    /// Current auction record for a name.
    async fn get_entry(&self, name: &str) -> Result<Entry, AuctionError>;

    /// Deed record at `address` (sentinel for the zero address).
    async fn get_deed(&self, address: Address) -> Result<Deed, AuctionError>;

    /// Phase of `entry` at the client's current time.
    fn entry_phase(&self, entry: &Entry) -> Phase;

    /// Builds a sealed bid. The commitment comes from the registrar's own
    /// commitment function so the later reveal matches.
    async fn build_bid(
        &self,
        name: &str,
        owner: Address,
        value: U256,
        secret: BidSecret,
    ) -> Result<Bid, AuctionError>;

    /// Starts an auction for `name` hidden among random decoys.
    async fn open_auction(&self, name: &str, tx: TxParams) -> Result<TxHandle, AuctionError>;

    /// Submits a sealed bid; `tx.value` is the deposit and must cover `bid.value`.
    async fn submit_bid(&self, bid: &Bid, tx: TxParams) -> Result<TxHandle, AuctionError>;

    /// Reveals a previously submitted bid.
    async fn reveal_bid(&self, bid: &Bid, tx: TxParams) -> Result<TxHandle, AuctionError>;

    /// True once the registrar has cleared the sealed bid record.
    async fn is_bid_revealed(&self, bid: &Bid) -> Result<bool, AuctionError>;

    /// Finalizes the auction for `name`.
    async fn finalize_auction(&self, name: &str, tx: TxParams) -> Result<TxHandle, AuctionError>;

    /// Ownership transfer. Not supported.
    async fn transfer(
        &self,
        name: &str,
        new_owner: Address,
        tx: TxParams,
    ) -> Result<TxHandle, AuctionError>;

    /// Deed release after the retention period. Not supported.
    async fn release_deed(&self, name: &str, tx: TxParams) -> Result<TxHandle, AuctionError>;

    /// Invalidation of a short name. Not supported.
    async fn invalidate_name(&self, name: &str, tx: TxParams) -> Result<TxHandle, AuctionError>;

    /// Registrar migration. Not supported.
    async fn transfer_registrars(&self, name: &str, tx: TxParams)
        -> Result<TxHandle, AuctionError>;
}
