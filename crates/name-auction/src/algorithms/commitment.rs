//! # Sealed-Bid Commitments
//!
//! The registrar recomputes the commitment at reveal time and looks up the
//! stored sealed bid by it, so the byte layout here is fixed:
//!
//! ```text
//! keccak256( identifier[32] ‖ owner[20] ‖ value[32, big-endian] ‖ secret_commitment[32] )
//! ```

use crate::domain::{keccak256, name_identifier, Address, Bid, BidSecret, Hash, U256};

/// Packed length of the commitment preimage.
pub const COMMITMENT_PREIMAGE_LEN: usize = 32 + 20 + 32 + 32;

/// Computes the sealed-bid commitment.
#[must_use]
pub fn seal_commitment(
    identifier: Hash,
    owner: Address,
    value: U256,
    secret_commitment: Hash,
) -> Hash {
    let mut value_bytes = [0u8; 32];
    value.to_big_endian(&mut value_bytes);

    let mut preimage = Vec::with_capacity(COMMITMENT_PREIMAGE_LEN);
    preimage.extend_from_slice(identifier.as_bytes());
    preimage.extend_from_slice(owner.as_bytes());
    preimage.extend_from_slice(&value_bytes);
    preimage.extend_from_slice(secret_commitment.as_bytes());

    keccak256(&preimage)
}

/// Builds a bid entirely locally from an already normalized name.
///
/// The service asks the ledger for the commitment instead; this is the same
/// computation for callers without a ledger at hand.
#[must_use]
pub fn seal_bid(normalized_name: &str, owner: Address, value: U256, secret: BidSecret) -> Bid {
    let identifier = name_identifier(normalized_name);
    let secret_commitment = secret.commitment();
    Bid {
        name: normalized_name.to_string(),
        identifier,
        value,
        owner,
        commitment: seal_commitment(identifier, owner, value, secret_commitment),
        secret,
        secret_commitment,
    }
}

/// Recomputes every derived field of `bid` and compares.
///
/// False means the registrar would not find a matching sealed bid on reveal.
#[must_use]
pub fn verify_bid(bid: &Bid) -> bool {
    let identifier = name_identifier(&bid.name);
    let secret_commitment = bid.secret.commitment();
    identifier == bid.identifier
        && secret_commitment == bid.secret_commitment
        && seal_commitment(identifier, bid.owner, bid.value, secret_commitment) == bid.commitment
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn owner() -> Address {
        Address::new([0x11; 20])
    }

    #[test]
    fn test_known_commitment_vector() {
        let identifier = name_identifier("foobarbaz");
        let secret_commitment = BidSecret::new("secret").commitment();
        let commitment = seal_commitment(identifier, owner(), U256::from(1_000_000u64), secret_commitment);
        assert_eq!(
            commitment.to_hex(),
            "0x7b3430cbdde88d205865addaf0511b27b0ae78860cc8f6d77f9761562461eb9f"
        );
    }

    #[test]
    fn test_every_field_is_bound() {
        let id = name_identifier("foobarbaz");
        let sc = BidSecret::new("secret").commitment();
        let base = seal_commitment(id, owner(), U256::from(5), sc);

        assert_ne!(base, seal_commitment(name_identifier("foobarbax"), owner(), U256::from(5), sc));
        assert_ne!(base, seal_commitment(id, Address::new([0x12; 20]), U256::from(5), sc));
        assert_ne!(base, seal_commitment(id, owner(), U256::from(6), sc));
        assert_ne!(base, seal_commitment(id, owner(), U256::from(5), BidSecret::new("other").commitment()));
    }

    #[test]
    fn test_seal_bid_verifies() {
        let bid = seal_bid("foobarbaz", owner(), U256::from(42), BidSecret::new("s"));
        assert!(verify_bid(&bid));
        assert_eq!(bid.secret_commitment, bid.secret.commitment());
    }

    #[test]
    fn test_tampered_bid_fails_verification() {
        let mut bid = seal_bid("foobarbaz", owner(), U256::from(42), BidSecret::new("s"));
        bid.value = U256::from(43);
        assert!(!verify_bid(&bid));

        let mut bid = seal_bid("foobarbaz", owner(), U256::from(42), BidSecret::new("s"));
        bid.secret = BidSecret::new("t");
        assert!(!verify_bid(&bid));
    }

    proptest! {
        #[test]
        fn prop_commitment_is_deterministic(
            name in "[a-z0-9]{7,20}",
            owner_bytes in any::<[u8; 20]>(),
            value in any::<u128>(),
            secret in ".{0,40}",
        ) {
            let a = seal_bid(&name, Address::new(owner_bytes), U256::from(value), BidSecret::new(secret.clone()));
            let b = seal_bid(&name, Address::new(owner_bytes), U256::from(value), BidSecret::new(secret));
            prop_assert_eq!(a.commitment, b.commitment);
            prop_assert!(verify_bid(&a));
        }
    }
}
