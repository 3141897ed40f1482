//! # Domain Entities
//!
//! Snapshots of ledger records (`Entry`, `Deed`) and the client-side sealed
//! bid (`Bid`). Entries and deeds are rebuilt on every query and never cached.

use super::errors::LedgerError;
use super::phase::{entry_phase, Phase};
use super::secret::BidSecret;
use super::value_objects::{Address, Hash, Timestamp, U256};
use serde::{Deserialize, Serialize};

/// Auction status of a name as stored by the registrar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryStatus {
    /// Never auctioned, or available again.
    Open,
    /// Auction running (bidding, reveal or awaiting finalization).
    Bidding,
    /// Auction finalized, a deed holds the name.
    Owned,
}

impl EntryStatus {
    /// Ledger status code.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::Bidding => 1,
            Self::Owned => 2,
        }
    }
}

impl TryFrom<u8> for EntryStatus {
    type Error = LedgerError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Open),
            1 => Ok(Self::Bidding),
            2 => Ok(Self::Owned),
            other => Err(LedgerError::InvalidResponse(format!(
                "unknown entry status code {other}"
            ))),
        }
    }
}

/// Escrow record backing a bid or an owned name.
///
/// Either every field besides `address` is `Some` (a live deed) or every field
/// is `None` and `address` is zero (the no-deed sentinel).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deed {
    /// Deed contract address (zero for no deed).
    pub address: Address,
    /// Funds held by the deed.
    pub balance: Option<U256>,
    /// Deed creation time.
    pub creation_date: Option<Timestamp>,
    /// Account owning the deed.
    pub owner: Option<Address>,
}

impl Deed {
    /// The no-deed sentinel.
    #[must_use]
    pub fn none() -> Self {
        Self {
            address: Address::ZERO,
            balance: None,
            creation_date: None,
            owner: None,
        }
    }

    /// A resolved, live deed.
    #[must_use]
    pub fn new(address: Address, balance: U256, creation_date: Timestamp, owner: Address) -> Self {
        Self {
            address,
            balance: Some(balance),
            creation_date: Some(creation_date),
            owner: Some(owner),
        }
    }

    /// True when this is the no-deed sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.address.is_zero()
    }
}

/// Raw entry tuple as returned by the registrar's `entry(identifier)` read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRecord {
    /// Status code (0 = Open, 1 = Bidding, 2 = Owned).
    pub status: u8,
    /// Deed address, zero if none.
    pub deed: Address,
    /// Registration deadline (end of the auction).
    pub registration_date: Timestamp,
    /// Current value (the price the winner pays).
    pub value: U256,
    /// Highest revealed bid.
    pub highest_bid: U256,
}

/// Immutable snapshot of a name's auction record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Normalized name.
    pub name: String,
    /// keccak256 of the normalized name.
    pub identifier: Hash,
    /// Ledger status.
    pub status: EntryStatus,
    /// Backing deed (sentinel when absent).
    pub deed: Deed,
    /// Registration deadline.
    pub registration_deadline: Timestamp,
    /// Current value.
    pub current_value: U256,
    /// Highest revealed bid.
    pub highest_bid: U256,
}

impl Entry {
    /// Builds an entry from a raw ledger record and its resolved deed.
    pub fn from_record(
        name: String,
        identifier: Hash,
        record: &EntryRecord,
        deed: Deed,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            name,
            identifier,
            status: EntryStatus::try_from(record.status)?,
            deed,
            registration_deadline: record.registration_date,
            current_value: record.value,
            highest_bid: record.highest_bid,
        })
    }

    /// Length of the name in characters.
    #[must_use]
    pub fn name_length(&self) -> usize {
        self.name.chars().count()
    }

    /// Auction phase at `now`. Always recomputed, never stored.
    #[must_use]
    pub fn phase(&self, now: Timestamp, min_name_length: usize) -> Phase {
        entry_phase(
            self.status,
            self.registration_deadline,
            now,
            self.name_length(),
            min_name_length,
        )
    }
}

/// A sealed bid that has not yet been revealed.
///
/// The ledger stores only `commitment` until reveal; the caller must keep the
/// whole bid (notably `value` and `secret`) to reveal it later.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// Normalized name.
    pub name: String,
    /// keccak256 of the normalized name.
    pub identifier: Hash,
    /// True bid amount.
    pub value: U256,
    /// Bidding account.
    pub owner: Address,
    /// Blinding secret.
    pub secret: BidSecret,
    /// keccak256 of the secret.
    pub secret_commitment: Hash,
    /// Sealed-bid hash over identifier, owner, value and secret commitment.
    pub commitment: Hash,
}
