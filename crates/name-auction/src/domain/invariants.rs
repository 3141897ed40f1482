//! # Domain Invariants
//!
//! Local preconditions checked before any ledger call, and consistency rules
//! every ledger snapshot must satisfy.

use super::entities::{Deed, Entry, EntryStatus};
use super::errors::{AuctionError, LedgerError};
use super::value_objects::U256;

/// Default minimum name length accepted by the registrar.
pub const DEFAULT_MIN_NAME_LENGTH: usize = 7;

/// Invariant: registrable names reach the minimum length.
///
/// Length is counted in characters of the normalized name.
pub fn invariant_name_length(normalized_name: &str, min_length: usize) -> Result<(), AuctionError> {
    let length = normalized_name.chars().count();
    if length < min_length {
        return Err(AuctionError::NameTooShort {
            name: normalized_name.to_string(),
            length,
            min_length,
        });
    }
    Ok(())
}

/// Invariant: the deposit covers the sealed value.
pub fn invariant_deposit_covers_value(deposit: U256, value: U256) -> Result<(), AuctionError> {
    if deposit < value {
        return Err(AuctionError::InsufficientDeposit { deposit, value });
    }
    Ok(())
}

/// Invariant: a deed is either fully resolved or the all-empty sentinel.
pub fn invariant_deed_complete(deed: &Deed) -> bool {
    let fields = [
        deed.balance.is_some(),
        deed.creation_date.is_some(),
        deed.owner.is_some(),
    ];
    if deed.is_none() {
        fields.iter().all(|set| !set)
    } else {
        fields.iter().all(|set| *set)
    }
}

/// Invariant: `Open` entries carry no deed, `Owned` entries always do.
pub fn invariant_entry_deed_consistent(entry: &Entry) -> bool {
    match entry.status {
        EntryStatus::Open => entry.deed.is_none(),
        EntryStatus::Owned => !entry.deed.is_none(),
        EntryStatus::Bidding => true,
    }
}

/// Checks a freshly built entry snapshot.
pub fn check_entry_snapshot(entry: &Entry) -> Result<(), LedgerError> {
    if !invariant_deed_complete(&entry.deed) {
        return Err(LedgerError::InvalidResponse(format!(
            "deed {} is partially resolved",
            entry.deed.address
        )));
    }
    if !invariant_entry_deed_consistent(entry) {
        return Err(LedgerError::InvalidResponse(format!(
            "entry {} has status {:?} with deed {}",
            entry.identifier, entry.status, entry.deed.address
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Address, Hash};

    fn entry(status: EntryStatus, deed: Deed) -> Entry {
        Entry {
            name: "foobarbaz".to_string(),
            identifier: Hash::new([1; 32]),
            status,
            deed,
            registration_deadline: 0,
            current_value: U256::zero(),
            highest_bid: U256::zero(),
        }
    }

    fn live_deed() -> Deed {
        Deed::new(Address::new([7; 20]), U256::from(10), 100, Address::new([1; 20]))
    }

    #[test]
    fn test_name_length_boundary() {
        assert!(invariant_name_length("abcdefg", 7).is_ok());
        let err = invariant_name_length("abcdef", 7).unwrap_err();
        assert!(matches!(
            err,
            AuctionError::NameTooShort { length: 6, min_length: 7, .. }
        ));
    }

    #[test]
    fn test_name_length_counts_chars_not_bytes() {
        // 6 characters, 12 bytes
        assert!(invariant_name_length("éééééé", 7).is_err());
    }

    #[test]
    fn test_deposit_must_cover_value() {
        assert!(invariant_deposit_covers_value(U256::from(10), U256::from(10)).is_ok());
        assert!(invariant_deposit_covers_value(U256::from(11), U256::from(10)).is_ok());
        assert!(matches!(
            invariant_deposit_covers_value(U256::from(9), U256::from(10)),
            Err(AuctionError::InsufficientDeposit { .. })
        ));
    }

    #[test]
    fn test_deed_completeness() {
        assert!(invariant_deed_complete(&Deed::none()));
        assert!(invariant_deed_complete(&live_deed()));

        let mut partial = live_deed();
        partial.owner = None;
        assert!(!invariant_deed_complete(&partial));

        let mut orphan = Deed::none();
        orphan.balance = Some(U256::one());
        assert!(!invariant_deed_complete(&orphan));
    }

    #[test]
    fn test_entry_deed_consistency() {
        assert!(invariant_entry_deed_consistent(&entry(EntryStatus::Open, Deed::none())));
        assert!(!invariant_entry_deed_consistent(&entry(EntryStatus::Open, live_deed())));
        assert!(invariant_entry_deed_consistent(&entry(EntryStatus::Owned, live_deed())));
        assert!(!invariant_entry_deed_consistent(&entry(EntryStatus::Owned, Deed::none())));
        assert!(invariant_entry_deed_consistent(&entry(EntryStatus::Bidding, Deed::none())));
    }

    #[test]
    fn test_check_entry_snapshot() {
        assert!(check_entry_snapshot(&entry(EntryStatus::Owned, live_deed())).is_ok());
        assert!(matches!(
            check_entry_snapshot(&entry(EntryStatus::Owned, Deed::none())),
            Err(LedgerError::InvalidResponse(_))
        ));
    }
}
