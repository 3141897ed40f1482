//! # Outbound Ports
//!
//! Collaborators the auction client depends on but does not implement:
//! the registrar ledger, the name normalizer and a clock.

use crate::algorithms::AuctionBatch;
use crate::domain::{
    Address, EntryRecord, Hash, LedgerError, NormalizationError, Timestamp, TxHandle, TxParams,
    U256,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Owner and creation date of a deed, as returned by `deed_info`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeedInfo {
    /// Deed creation time.
    pub creation_date: Timestamp,
    /// Account owning the deed.
    pub owner: Address,
}

/// Registrar ledger - outbound port.
///
/// Reads are side-effect free. Each write dispatches exactly one transaction
/// and returns its handle; implementations must not retry on their own, the
/// ledger's nonce ordering is the caller's to manage.
#[async_trait]
pub trait RegistrarLedger: Send + Sync {
    /// Owner of the namespace suffix, i.e. the registrar contract address.
    async fn resolve_owner(&self, namespace_suffix: &str) -> Result<Address, LedgerError>;

    /// Raw entry record for an identifier.
    async fn entry(&self, registrar: Address, identifier: Hash) -> Result<EntryRecord, LedgerError>;

    /// Creation date and owner of a deed.
    async fn deed_info(&self, deed: Address) -> Result<DeedInfo, LedgerError>;

    /// Balance held at an address.
    async fn balance_of(&self, address: Address) -> Result<U256, LedgerError>;

    /// Deed stored for a sealed bid, or `Address::ZERO` once revealed or never submitted.
    async fn sealed_bid_record(
        &self,
        registrar: Address,
        commitment: Hash,
    ) -> Result<Address, LedgerError>;

    /// The registrar's own commitment function (a view call).
    async fn commitment_of(
        &self,
        registrar: Address,
        identifier: Hash,
        owner: Address,
        value: U256,
        secret_commitment: Hash,
    ) -> Result<Hash, LedgerError>;

    /// Starts auctions for a batch of identifiers.
    async fn start_auctions(
        &self,
        registrar: Address,
        identifiers: &AuctionBatch,
        tx: &TxParams,
    ) -> Result<TxHandle, LedgerError>;

    /// Stores a sealed bid; `tx.value` is the deposit.
    async fn submit_sealed_bid(
        &self,
        registrar: Address,
        commitment: Hash,
        tx: &TxParams,
    ) -> Result<TxHandle, LedgerError>;

    /// Discloses a sealed bid's plaintext so the registrar can match it.
    async fn reveal_bid(
        &self,
        registrar: Address,
        identifier: Hash,
        owner: Address,
        value: U256,
        secret_commitment: Hash,
        tx: &TxParams,
    ) -> Result<TxHandle, LedgerError>;

    /// Closes an auction; the registrar picks the winner.
    async fn finalize_auction(
        &self,
        registrar: Address,
        identifier: Hash,
        tx: &TxParams,
    ) -> Result<TxHandle, LedgerError>;
}

/// Name normalization - outbound port.
///
/// Maps a raw user-supplied name to its canonical form. Failures are
/// forwarded to the caller unchanged.
pub trait NameNormalizer: Send + Sync {
    /// Canonical form of `raw`.
    fn normalize(&self, raw: &str) -> Result<String, NormalizationError>;
}

/// Time source for phase evaluation.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Current unix time in seconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Fixed time source for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub Timestamp);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_time_source_is_recent() {
        // 2023-11-14 or later
        assert!(SystemTimeSource.now() > 1_700_000_000);
    }

    #[test]
    fn test_fixed_time_source() {
        assert_eq!(FixedTimeSource(42).now(), 42);
    }

    #[test]
    fn test_shared_time_source() {
        let shared: Arc<dyn TimeSource> = Arc::new(FixedTimeSource(7));
        assert_eq!(shared.now(), 7);
    }
}
