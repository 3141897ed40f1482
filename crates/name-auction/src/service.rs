//! # Name Auction Service
//!
//! The auction orchestrator. Construction is two-phase:
//!
//! 1. [`NameAuctionClient::new`] captures configuration and collaborators.
//! 2. [`NameAuctionClient::connect`] resolves the registrar address and
//!    returns a [`NameAuctionService`] that is ready to use.
//!
//! The connected service holds only immutable state. Every operation
//! validates its preconditions locally, then issues its ledger calls and
//! surfaces the first failure unchanged. Nothing is retried.

use crate::adapters::LabelNormalizer;
use crate::algorithms::{decoy_batch, seal_commitment};
use crate::config::AuctionConfig;
use crate::domain::{
    check_entry_snapshot, invariant_deposit_covers_value, invariant_name_length, name_identifier,
    Address, AuctionError, Bid, BidSecret, Deed, Entry, LedgerError, Phase, TxHandle, TxParams,
    U256,
};
use crate::ports::inbound::NameAuctionApi;
use crate::ports::outbound::{NameNormalizer, RegistrarLedger, SystemTimeSource, TimeSource};

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Unconnected client: configuration and collaborators, no resolved state.
pub struct NameAuctionClient<L: ?Sized, N = LabelNormalizer, T = SystemTimeSource> {
    config: AuctionConfig,
    ledger: Arc<L>,
    normalizer: N,
    time_source: T,
}

impl<L: RegistrarLedger + ?Sized> NameAuctionClient<L> {
    /// Client with the default label normalizer and the system clock.
    pub fn new(config: AuctionConfig, ledger: Arc<L>) -> Self {
        Self {
            config,
            ledger,
            normalizer: LabelNormalizer,
            time_source: SystemTimeSource,
        }
    }
}

impl<L, N, T> NameAuctionClient<L, N, T>
where
    L: RegistrarLedger + ?Sized,
    N: NameNormalizer,
    T: TimeSource,
{
    /// Replace the name normalizer.
    pub fn with_normalizer<N2: NameNormalizer>(self, normalizer: N2) -> NameAuctionClient<L, N2, T> {
        NameAuctionClient {
            config: self.config,
            ledger: self.ledger,
            normalizer,
            time_source: self.time_source,
        }
    }

    /// Replace the clock used for phase evaluation.
    pub fn with_time_source<T2: TimeSource>(self, time_source: T2) -> NameAuctionClient<L, N, T2> {
        NameAuctionClient {
            config: self.config,
            ledger: self.ledger,
            normalizer: self.normalizer,
            time_source,
        }
    }

    /// Client configuration.
    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    /// Resolves the registrar that owns the configured namespace.
    ///
    /// # Errors
    ///
    /// Ledger failures are returned unchanged. A namespace with no owner
    /// (the zero address) is reported as `LedgerError::InvalidResponse`.
    #[instrument(skip(self), fields(namespace = %self.config.namespace_suffix))]
    pub async fn connect(self) -> Result<NameAuctionService<L, N, T>, AuctionError> {
        let registrar = self
            .ledger
            .resolve_owner(&self.config.namespace_suffix)
            .await?;

        if registrar.is_zero() {
            return Err(LedgerError::InvalidResponse(format!(
                "namespace {:?} has no registrar",
                self.config.namespace_suffix
            ))
            .into());
        }

        info!(registrar = %registrar, "registrar resolved");

        Ok(NameAuctionService {
            config: self.config,
            ledger: self.ledger,
            normalizer: self.normalizer,
            time_source: self.time_source,
            registrar,
        })
    }
}

/// Connected auction orchestrator.
pub struct NameAuctionService<L: ?Sized, N = LabelNormalizer, T = SystemTimeSource> {
    config: AuctionConfig,
    ledger: Arc<L>,
    normalizer: N,
    time_source: T,
    registrar: Address,
}

impl<L, N, T> NameAuctionService<L, N, T>
where
    L: RegistrarLedger + ?Sized,
    N: NameNormalizer,
    T: TimeSource,
{
    /// Resolved registrar address.
    pub fn registrar(&self) -> Address {
        self.registrar
    }

    /// Client configuration.
    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    /// Normalizes `name` and enforces the minimum length.
    fn normalize_checked(&self, name: &str) -> Result<String, AuctionError> {
        let normalized = self.normalizer.normalize(name)?;
        invariant_name_length(&normalized, self.config.min_name_length).map_err(reject)?;
        Ok(normalized)
    }

    fn tx_params(&self, tx: TxParams) -> TxParams {
        match (tx.gas, self.config.default_gas_limit) {
            (None, Some(gas)) => tx.with_gas(gas),
            _ => tx,
        }
    }

    async fn resolve_deed(&self, address: Address) -> Result<Deed, AuctionError> {
        if address.is_zero() {
            return Ok(Deed::none());
        }
        let info = self.ledger.deed_info(address).await?;
        let balance = self.ledger.balance_of(address).await?;
        Ok(Deed::new(address, balance, info.creation_date, info.owner))
    }
}

/// Logs a local rejection. The deposit error's message carries the sealed
/// bid value, so only its kind is recorded.
fn reject(err: AuctionError) -> AuctionError {
    match &err {
        AuctionError::NameTooShort {
            length, min_length, ..
        } => warn!(length, min_length, "name too short, rejected before ledger call"),
        AuctionError::InsufficientDeposit { .. } => {
            warn!(kind = "insufficient_deposit", "rejected before ledger call");
        }
        other => warn!(error = %other, "rejected before ledger call"),
    }
    err
}

#[async_trait]
impl<L, N, T> NameAuctionApi for NameAuctionService<L, N, T>
where
    L: RegistrarLedger + ?Sized,
    N: NameNormalizer,
    T: TimeSource,
{
    #[instrument(skip(self))]
    async fn get_entry(&self, name: &str) -> Result<Entry, AuctionError> {
        let normalized = self.normalizer.normalize(name)?;
        let identifier = name_identifier(&normalized);
        let record = self.ledger.entry(self.registrar, identifier).await?;
        let deed = self.resolve_deed(record.deed).await?;

        let entry = Entry::from_record(normalized, identifier, &record, deed)?;
        check_entry_snapshot(&entry)?;

        debug!(identifier = %identifier, status = ?entry.status, "entry loaded");
        Ok(entry)
    }

    #[instrument(skip(self))]
    async fn get_deed(&self, address: Address) -> Result<Deed, AuctionError> {
        self.resolve_deed(address).await
    }

    fn entry_phase(&self, entry: &Entry) -> Phase {
        entry.phase(self.time_source.now(), self.config.min_name_length)
    }

    #[instrument(skip(self, value, secret))]
    async fn build_bid(
        &self,
        name: &str,
        owner: Address,
        value: U256,
        secret: BidSecret,
    ) -> Result<Bid, AuctionError> {
        let normalized = self.normalize_checked(name)?;
        let identifier = name_identifier(&normalized);
        let secret_commitment = secret.commitment();

        let commitment = self
            .ledger
            .commitment_of(self.registrar, identifier, owner, value, secret_commitment)
            .await?;

        if commitment != seal_commitment(identifier, owner, value, secret_commitment) {
            warn!(commitment = %commitment, "registrar commitment differs from local encoding");
        }

        debug!(commitment = %commitment, "bid sealed");
        Ok(Bid {
            name: normalized,
            identifier,
            value,
            owner,
            secret,
            secret_commitment,
            commitment,
        })
    }

    #[instrument(skip(self, tx), fields(request_id = %Uuid::new_v4()))]
    async fn open_auction(&self, name: &str, tx: TxParams) -> Result<TxHandle, AuctionError> {
        let normalized = self.normalize_checked(name)?;
        let target = name_identifier(&normalized);

        let batch = {
            let mut rng = rand::thread_rng();
            decoy_batch(target, &mut rng)
        };

        let handle = self
            .ledger
            .start_auctions(self.registrar, &batch, &self.tx_params(tx))
            .await?;

        info!(tx = %handle, "auction batch dispatched");
        Ok(handle)
    }

    #[instrument(
        skip(self, bid, tx),
        fields(request_id = %Uuid::new_v4(), commitment = %bid.commitment)
    )]
    async fn submit_bid(&self, bid: &Bid, tx: TxParams) -> Result<TxHandle, AuctionError> {
        invariant_deposit_covers_value(tx.value, bid.value).map_err(reject)?;

        let handle = self
            .ledger
            .submit_sealed_bid(self.registrar, bid.commitment, &self.tx_params(tx))
            .await?;

        info!(tx = %handle, "sealed bid submitted");
        Ok(handle)
    }

    #[instrument(
        skip(self, bid, tx),
        fields(request_id = %Uuid::new_v4(), name = %bid.name)
    )]
    async fn reveal_bid(&self, bid: &Bid, tx: TxParams) -> Result<TxHandle, AuctionError> {
        let handle = self
            .ledger
            .reveal_bid(
                self.registrar,
                bid.identifier,
                bid.owner,
                bid.value,
                bid.secret_commitment,
                &self.tx_params(tx),
            )
            .await?;

        info!(tx = %handle, "bid revealed");
        Ok(handle)
    }

    #[instrument(skip(self, bid), fields(commitment = %bid.commitment))]
    async fn is_bid_revealed(&self, bid: &Bid) -> Result<bool, AuctionError> {
        let record = self
            .ledger
            .sealed_bid_record(self.registrar, bid.commitment)
            .await?;
        debug!(record = %record, "sealed bid record");
        Ok(record.is_zero())
    }

    #[instrument(skip(self, tx), fields(request_id = %Uuid::new_v4()))]
    async fn finalize_auction(&self, name: &str, tx: TxParams) -> Result<TxHandle, AuctionError> {
        let normalized = self.normalizer.normalize(name)?;
        let identifier = name_identifier(&normalized);

        let handle = self
            .ledger
            .finalize_auction(self.registrar, identifier, &self.tx_params(tx))
            .await?;

        info!(tx = %handle, "auction finalized");
        Ok(handle)
    }

    async fn transfer(
        &self,
        _name: &str,
        _new_owner: Address,
        _tx: TxParams,
    ) -> Result<TxHandle, AuctionError> {
        Err(AuctionError::Unsupported {
            operation: "transfer",
        })
    }

    async fn release_deed(&self, _name: &str, _tx: TxParams) -> Result<TxHandle, AuctionError> {
        Err(AuctionError::Unsupported {
            operation: "release_deed",
        })
    }

    async fn invalidate_name(&self, _name: &str, _tx: TxParams) -> Result<TxHandle, AuctionError> {
        Err(AuctionError::Unsupported {
            operation: "invalidate_name",
        })
    }

    async fn transfer_registrars(
        &self,
        _name: &str,
        _tx: TxParams,
    ) -> Result<TxHandle, AuctionError> {
        Err(AuctionError::Unsupported {
            operation: "transfer_registrars",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRegistrar;
    use crate::domain::NormalizationError;
    use crate::ports::outbound::FixedTimeSource;

    const REGISTRAR: Address = Address::new([0xEE; 20]);

    fn ledger() -> Arc<InMemoryRegistrar> {
        Arc::new(InMemoryRegistrar::new("eth", REGISTRAR))
    }

    async fn connected(
        ledger: Arc<InMemoryRegistrar>,
    ) -> NameAuctionService<InMemoryRegistrar> {
        NameAuctionClient::new(AuctionConfig::default(), ledger)
            .connect()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_connect_resolves_registrar() {
        let service = connected(ledger()).await;
        assert_eq!(service.registrar(), REGISTRAR);
        assert_eq!(service.config().namespace_suffix, "eth");
    }

    #[tokio::test]
    async fn test_connect_rejects_unowned_namespace() {
        let config = AuctionConfig::default().with_namespace_suffix("test");
        let result = NameAuctionClient::new(config, ledger()).connect().await;
        assert!(matches!(
            result,
            Err(AuctionError::Ledger(LedgerError::InvalidResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_connect_propagates_transport_failure() {
        let ledger = ledger();
        ledger.set_failing(true);
        let result = NameAuctionClient::new(AuctionConfig::default(), ledger)
            .connect()
            .await;
        assert!(matches!(
            result,
            Err(AuctionError::Ledger(LedgerError::Transport(_)))
        ));
    }

    #[tokio::test]
    async fn test_short_name_rejected_without_ledger_call() {
        let ledger = ledger();
        let service = connected(ledger.clone()).await;
        ledger.set_failing(true);

        let err = service
            .build_bid("short", Address::new([1; 20]), U256::from(1), BidSecret::new("s"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuctionError::NameTooShort { length: 5, .. }));
        assert!(err.is_precondition_failure());
    }

    #[tokio::test]
    async fn test_build_bid_matches_local_encoding() {
        let service = connected(ledger()).await;
        let owner = Address::new([0x11; 20]);
        let bid = service
            .build_bid("FooBarBaz", owner, U256::from(1_000_000), BidSecret::new("secret"))
            .await
            .unwrap();

        assert_eq!(bid.name, "foobarbaz");
        assert_eq!(bid.identifier, name_identifier("foobarbaz"));
        assert_eq!(
            bid.commitment,
            seal_commitment(bid.identifier, owner, bid.value, bid.secret_commitment)
        );
    }

    #[tokio::test]
    async fn test_normalization_error_forwarded() {
        let service = connected(ledger()).await;
        let err = service.get_entry("foo.bar.baz").await.unwrap_err();
        assert!(matches!(
            err,
            AuctionError::Normalization(NormalizationError::DisallowedCharacter { character: '.', .. })
        ));
    }

    #[tokio::test]
    async fn test_get_entry_for_fresh_name() {
        let service = connected(ledger()).await;
        let entry = service.get_entry("foobarbaz").await.unwrap();
        assert!(entry.deed.is_none());
        assert_eq!(service.entry_phase(&entry), Phase::OpenForAuction);
    }

    #[tokio::test]
    async fn test_get_entry_allows_short_names() {
        let service = connected(ledger()).await;
        let entry = service.get_entry("abc").await.unwrap();
        assert_eq!(service.entry_phase(&entry), Phase::Invalid);
    }

    #[tokio::test]
    async fn test_entry_phase_uses_time_source() {
        let ledger = ledger();
        let service = NameAuctionClient::new(AuctionConfig::default(), ledger.clone())
            .with_time_source(FixedTimeSource(0))
            .connect()
            .await
            .unwrap();
        service
            .open_auction("foobarbaz", TxParams::from_account(Address::new([1; 20])))
            .await
            .unwrap();

        // Deadline is days ahead of a clock stuck at zero.
        let entry = service.get_entry("foobarbaz").await.unwrap();
        assert_eq!(service.entry_phase(&entry), Phase::Auction);
    }

    #[tokio::test]
    async fn test_default_gas_applied() {
        let service = connected(ledger()).await;
        let from = TxParams::from_account(Address::new([1; 20]));
        assert_eq!(service.tx_params(from.clone()).gas, Some(500_000));
        assert_eq!(service.tx_params(from.with_gas(21_000)).gas, Some(21_000));
    }

    #[tokio::test]
    async fn test_stubs_are_unsupported() {
        let ledger = ledger();
        let service = connected(ledger.clone()).await;
        let tx = TxParams::from_account(Address::new([1; 20]));

        let results = [
            service.transfer("foobarbaz", Address::new([2; 20]), tx.clone()).await,
            service.release_deed("foobarbaz", tx.clone()).await,
            service.invalidate_name("foobarbaz", tx.clone()).await,
            service.transfer_registrars("foobarbaz", tx).await,
        ];
        for result in results {
            assert!(matches!(result, Err(AuctionError::Unsupported { .. })));
        }
        assert_eq!(ledger.write_count(), 0);
    }
}
