//! # Bid Secret
//!
//! Caller-supplied entropy that blinds a sealed bid. The ledger never sees it
//! until reveal, so the caller persists it alongside the bid.
//!
//! ## Security
//!
//! The wrapper zeroizes its buffer on drop and never prints its contents in
//! `Debug` output or tracing fields.

use crate::domain::hashing::keccak256;
use crate::domain::value_objects::Hash;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A bid secret that zeroizes on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BidSecret {
    inner: String,
}

impl BidSecret {
    /// Wraps a caller-chosen secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            inner: secret.into(),
        }
    }

    /// Generates a random 32-byte secret rendered as prefixed hex.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        let secret = Self::new(crate::domain::hashing::prefixed_hex(&bytes));
        bytes.zeroize();
        secret
    }

    /// Get the secret text (use carefully!).
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// keccak256 of the secret's UTF-8 bytes; the value the ledger sees at reveal.
    pub fn commitment(&self) -> Hash {
        keccak256(self.inner.as_bytes())
    }
}

impl std::fmt::Debug for BidSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BidSecret(***)")
    }
}

// The caller persists bids until reveal, so the secret round-trips in clear.
impl Serialize for BidSecret {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for BidSecret {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_value() {
        let secret = BidSecret::new("hunter2-but-longer");
        let debug_str = format!("{secret:?}");
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("***"));
    }

    #[test]
    fn test_commitment_is_keccak_of_text() {
        let secret = BidSecret::new("eth");
        assert_eq!(
            secret.commitment().to_hex(),
            "0x4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0"
        );
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = BidSecret::random();
        let b = BidSecret::random();
        assert_ne!(a, b);
        assert_eq!(a.expose().len(), 66);
    }

    #[test]
    fn test_serde_keeps_secret_text() {
        let secret = BidSecret::new("s3cr3t");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(json, "\"s3cr3t\"");
        let back: BidSecret = serde_json::from_str(&json).unwrap();
        assert_eq!(back, secret);
    }
}
