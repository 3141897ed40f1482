//! In-Memory Registrar Adapter
//!
//! Implements `RegistrarLedger` in process, for tests and local simulation.
//! A deployed registrar contract enforces the same bookkeeping on chain.
//!
//! Rules modelled here:
//! - `start_auctions` opens every identifier for `AUCTION_LENGTH_SECS`. An
//!   auction left unfinalized past its finalize window may be restarted; its
//!   leading deed is refunded.
//! - A sealed bid locks its deposit in a fresh deed keyed by commitment.
//! - Reveal is accepted only in the reveal window. The highest bid keeps its
//!   deed (holding exactly the bid value); every other deposit is refunded.
//! - Finalize after the deadline charges the second price and marks the
//!   entry owned, or reopens it when nobody revealed.

use crate::algorithms::{seal_commitment, AuctionBatch};
use crate::domain::{
    entry_phase, keccak256, Address, EntryRecord, EntryStatus, Hash, LedgerError, Phase,
    Timestamp, TxHandle, TxParams, U256,
};
use crate::ports::outbound::{DeedInfo, RegistrarLedger, TimeSource};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

/// Auction length from `start_auctions` to the registration deadline.
pub const AUCTION_LENGTH_SECS: u64 = 5 * 24 * 60 * 60;

/// A write observed by the in-memory registrar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteCall {
    /// `start_auctions` with its batch.
    StartAuctions(AuctionBatch),
    /// `submit_sealed_bid` with the commitment and deposit.
    SubmitSealedBid {
        /// Sealed bid hash.
        commitment: Hash,
        /// Attached deposit.
        deposit: U256,
    },
    /// `reveal_bid` with the disclosed plaintext.
    RevealBid {
        /// Name identifier.
        identifier: Hash,
        /// Bidder.
        owner: Address,
        /// Disclosed value.
        value: U256,
    },
    /// `finalize_auction` for an identifier.
    FinalizeAuction(Hash),
}

#[derive(Clone, Debug)]
struct EntrySlot {
    status: EntryStatus,
    deed: Address,
    registration_date: Timestamp,
    value: U256,
    highest_bid: U256,
}

impl EntrySlot {
    fn record(&self) -> EntryRecord {
        EntryRecord {
            status: self.status.code(),
            deed: self.deed,
            registration_date: self.registration_date,
            value: self.value,
            highest_bid: self.highest_bid,
        }
    }
}

#[derive(Clone, Debug)]
struct DeedSlot {
    owner: Address,
    creation_date: Timestamp,
    balance: U256,
}

#[derive(Default)]
struct RegistrarState {
    entries: HashMap<Hash, EntrySlot>,
    deeds: HashMap<Address, DeedSlot>,
    sealed_bids: HashMap<Hash, Address>,
    accounts: HashMap<Address, U256>,
    writes: Vec<WriteCall>,
    nonce: u64,
}

impl RegistrarState {
    fn next_nonce(&mut self) -> u64 {
        self.nonce += 1;
        self.nonce
    }

    fn next_tx(&mut self, kind: &[u8]) -> TxHandle {
        let nonce = self.next_nonce();
        let mut preimage = kind.to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        keccak256(&preimage)
    }

    fn new_deed(&mut self, owner: Address, balance: U256, now: Timestamp) -> Address {
        let nonce = self.next_nonce();
        let mut preimage = b"deed".to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let hash = keccak256(&preimage);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash.as_bytes()[12..32]);
        let address = Address::new(bytes);
        self.deeds.insert(
            address,
            DeedSlot {
                owner,
                creation_date: now,
                balance,
            },
        );
        address
    }

    fn credit(&mut self, account: Address, amount: U256) {
        if amount.is_zero() {
            return;
        }
        *self.accounts.entry(account).or_default() += amount;
    }

    /// Closes a deed, refunding its whole balance to its owner.
    fn close_deed(&mut self, deed: Address) {
        if let Some(slot) = self.deeds.remove(&deed) {
            self.credit(slot.owner, slot.balance);
        }
    }
}

/// In-memory registrar for testing.
pub struct InMemoryRegistrar {
    registrar: Address,
    namespace_suffix: String,
    state: RwLock<RegistrarState>,
    current_time: RwLock<Timestamp>,
    failing: RwLock<bool>,
}

impl InMemoryRegistrar {
    /// Registrar owning `namespace_suffix`, deployed at `registrar`.
    pub fn new(namespace_suffix: impl Into<String>, registrar: Address) -> Self {
        Self {
            registrar,
            namespace_suffix: namespace_suffix.into(),
            state: RwLock::new(RegistrarState::default()),
            current_time: RwLock::new(1_700_000_000),
            failing: RwLock::new(false),
        }
    }

    /// Registrar contract address.
    pub fn registrar_address(&self) -> Address {
        self.registrar
    }

    /// Set current time for testing.
    pub fn set_time(&self, time: Timestamp) {
        *self.current_time.write() = time;
    }

    /// Advance time for testing.
    pub fn advance_time(&self, secs: u64) {
        *self.current_time.write() += secs;
    }

    /// Make every subsequent call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write() = failing;
    }

    /// Seeds a raw entry record (for snapshot tests).
    pub fn insert_entry(&self, identifier: Hash, record: EntryRecord) -> Result<(), LedgerError> {
        let slot = EntrySlot {
            status: EntryStatus::try_from(record.status)?,
            deed: record.deed,
            registration_date: record.registration_date,
            value: record.value,
            highest_bid: record.highest_bid,
        };
        self.state.write().entries.insert(identifier, slot);
        Ok(())
    }

    /// Seeds a deed (for snapshot tests).
    pub fn insert_deed(&self, deed: Address, owner: Address, creation_date: Timestamp, balance: U256) {
        self.state.write().deeds.insert(
            deed,
            DeedSlot {
                owner,
                creation_date,
                balance,
            },
        );
    }

    /// Every write received so far, in order.
    pub fn writes(&self) -> Vec<WriteCall> {
        self.state.read().writes.clone()
    }

    /// Number of writes received so far.
    pub fn write_count(&self) -> usize {
        self.state.read().writes.len()
    }

    /// Batch of the most recent `start_auctions` call.
    pub fn last_auction_batch(&self) -> Option<AuctionBatch> {
        self.state.read().writes.iter().rev().find_map(|call| match call {
            WriteCall::StartAuctions(batch) => Some(*batch),
            _ => None,
        })
    }

    fn check_available(&self) -> Result<(), LedgerError> {
        if *self.failing.read() {
            return Err(LedgerError::Transport("in-memory registrar offline".to_string()));
        }
        Ok(())
    }

    fn check_registrar(&self, registrar: Address) -> Result<(), LedgerError> {
        if registrar != self.registrar {
            return Err(LedgerError::Reverted(format!(
                "no registrar deployed at {registrar}"
            )));
        }
        Ok(())
    }
}

/// The simulated chain clock, so a client can share the registrar's notion of time.
impl TimeSource for InMemoryRegistrar {
    fn now(&self) -> Timestamp {
        *self.current_time.read()
    }
}

#[async_trait]
impl RegistrarLedger for InMemoryRegistrar {
    async fn resolve_owner(&self, namespace_suffix: &str) -> Result<Address, LedgerError> {
        self.check_available()?;
        if namespace_suffix == self.namespace_suffix {
            Ok(self.registrar)
        } else {
            Ok(Address::ZERO)
        }
    }

    async fn entry(&self, registrar: Address, identifier: Hash) -> Result<EntryRecord, LedgerError> {
        self.check_available()?;
        self.check_registrar(registrar)?;
        let state = self.state.read();
        Ok(state.entries.get(&identifier).map_or(
            EntryRecord {
                status: EntryStatus::Open.code(),
                deed: Address::ZERO,
                registration_date: 0,
                value: U256::zero(),
                highest_bid: U256::zero(),
            },
            EntrySlot::record,
        ))
    }

    async fn deed_info(&self, deed: Address) -> Result<DeedInfo, LedgerError> {
        self.check_available()?;
        self.state
            .read()
            .deeds
            .get(&deed)
            .map(|slot| DeedInfo {
                creation_date: slot.creation_date,
                owner: slot.owner,
            })
            .ok_or_else(|| LedgerError::Reverted(format!("no deed at {deed}")))
    }

    async fn balance_of(&self, address: Address) -> Result<U256, LedgerError> {
        self.check_available()?;
        let state = self.state.read();
        Ok(state
            .deeds
            .get(&address)
            .map(|slot| slot.balance)
            .or_else(|| state.accounts.get(&address).copied())
            .unwrap_or_default())
    }

    async fn sealed_bid_record(
        &self,
        registrar: Address,
        commitment: Hash,
    ) -> Result<Address, LedgerError> {
        self.check_available()?;
        self.check_registrar(registrar)?;
        Ok(self
            .state
            .read()
            .sealed_bids
            .get(&commitment)
            .copied()
            .unwrap_or(Address::ZERO))
    }

    async fn commitment_of(
        &self,
        registrar: Address,
        identifier: Hash,
        owner: Address,
        value: U256,
        secret_commitment: Hash,
    ) -> Result<Hash, LedgerError> {
        self.check_available()?;
        self.check_registrar(registrar)?;
        Ok(seal_commitment(identifier, owner, value, secret_commitment))
    }

    async fn start_auctions(
        &self,
        registrar: Address,
        identifiers: &AuctionBatch,
        _tx: &TxParams,
    ) -> Result<TxHandle, LedgerError> {
        self.check_available()?;
        self.check_registrar(registrar)?;
        let now = self.now();
        let mut state = self.state.write();

        // Open entries and overdue, never-finalized auctions may be (re)started.
        if let Some(busy) = identifiers.iter().find(|id| {
            state.entries.get(*id).is_some_and(|slot| {
                slot.status != EntryStatus::Open
                    && entry_phase(slot.status, slot.registration_date, now, 0, 0)
                        != Phase::FinalizeOpen
            })
        }) {
            return Err(LedgerError::Reverted(format!("auction for {busy} is not open")));
        }

        for id in identifiers {
            let stale_deed = state
                .entries
                .get(id)
                .map_or(Address::ZERO, |slot| slot.deed);
            if !stale_deed.is_zero() {
                state.close_deed(stale_deed);
            }
            state.entries.insert(
                *id,
                EntrySlot {
                    status: EntryStatus::Bidding,
                    deed: Address::ZERO,
                    registration_date: now + AUCTION_LENGTH_SECS,
                    value: U256::zero(),
                    highest_bid: U256::zero(),
                },
            );
        }
        state.writes.push(WriteCall::StartAuctions(*identifiers));
        let tx = state.next_tx(b"startAuctions");
        info!(tx = %tx, "in-memory registrar started auction batch");
        Ok(tx)
    }

    async fn submit_sealed_bid(
        &self,
        registrar: Address,
        commitment: Hash,
        tx: &TxParams,
    ) -> Result<TxHandle, LedgerError> {
        self.check_available()?;
        self.check_registrar(registrar)?;
        let now = self.now();
        let mut state = self.state.write();

        if state.sealed_bids.contains_key(&commitment) {
            return Err(LedgerError::Reverted(format!(
                "sealed bid {commitment} already submitted"
            )));
        }

        let deed = state.new_deed(tx.from, tx.value, now);
        state.sealed_bids.insert(commitment, deed);
        state.writes.push(WriteCall::SubmitSealedBid {
            commitment,
            deposit: tx.value,
        });
        debug!(commitment = %commitment, deed = %deed, "sealed bid stored");
        Ok(state.next_tx(b"newBid"))
    }

    async fn reveal_bid(
        &self,
        registrar: Address,
        identifier: Hash,
        owner: Address,
        value: U256,
        secret_commitment: Hash,
        _tx: &TxParams,
    ) -> Result<TxHandle, LedgerError> {
        self.check_available()?;
        self.check_registrar(registrar)?;
        let now = self.now();
        let mut state = self.state.write();

        let commitment = seal_commitment(identifier, owner, value, secret_commitment);
        let bid_deed = *state
            .sealed_bids
            .get(&commitment)
            .ok_or_else(|| LedgerError::Reverted("no sealed bid matches the reveal".to_string()))?;

        let entry = state
            .entries
            .get(&identifier)
            .cloned()
            .ok_or_else(|| LedgerError::Reverted(format!("no auction for {identifier}")))?;
        if entry_phase(entry.status, entry.registration_date, now, 0, 0) != Phase::Reveal {
            return Err(LedgerError::Reverted(format!(
                "{identifier} is not in its reveal window"
            )));
        }

        state.sealed_bids.remove(&commitment);
        state.writes.push(WriteCall::RevealBid {
            identifier,
            owner,
            value,
        });

        let deposit = state.deeds.get(&bid_deed).map_or(U256::zero(), |d| d.balance);
        let effective = value.min(deposit);

        if effective > entry.highest_bid {
            // New winner: previous leader refunded, surplus returned, deed keeps the bid.
            if !entry.deed.is_zero() {
                state.close_deed(entry.deed);
            }
            state.credit(owner, deposit - effective);
            if let Some(slot) = state.deeds.get_mut(&bid_deed) {
                slot.balance = effective;
            }
            if let Some(slot) = state.entries.get_mut(&identifier) {
                slot.value = entry.highest_bid;
                slot.highest_bid = effective;
                slot.deed = bid_deed;
            }
        } else {
            if effective > entry.value {
                if let Some(slot) = state.entries.get_mut(&identifier) {
                    slot.value = effective;
                }
            }
            state.close_deed(bid_deed);
        }

        debug!(identifier = %identifier, "bid revealed");
        Ok(state.next_tx(b"unsealBid"))
    }

    async fn finalize_auction(
        &self,
        registrar: Address,
        identifier: Hash,
        _tx: &TxParams,
    ) -> Result<TxHandle, LedgerError> {
        self.check_available()?;
        self.check_registrar(registrar)?;
        let now = self.now();
        let mut state = self.state.write();

        let entry = state
            .entries
            .get(&identifier)
            .cloned()
            .ok_or_else(|| LedgerError::Reverted(format!("no auction for {identifier}")))?;
        if entry.status != EntryStatus::Bidding || now < entry.registration_date {
            return Err(LedgerError::Reverted(format!(
                "auction for {identifier} cannot be finalized yet"
            )));
        }

        if entry.deed.is_zero() {
            if let Some(slot) = state.entries.get_mut(&identifier) {
                slot.status = EntryStatus::Open;
            }
        } else {
            let price = entry.value;
            let mut refund = None;
            if let Some(deed) = state.deeds.get_mut(&entry.deed) {
                refund = Some((deed.owner, deed.balance - price));
                deed.balance = price;
            }
            if let Some((owner, amount)) = refund {
                state.credit(owner, amount);
            }
            if let Some(slot) = state.entries.get_mut(&identifier) {
                slot.status = EntryStatus::Owned;
                slot.registration_date = now;
            }
        }

        state.writes.push(WriteCall::FinalizeAuction(identifier));
        info!(identifier = %identifier, "auction finalized");
        Ok(state.next_tx(b"finalizeAuction"))
    }
}
