//! # Hashing Adapter
//!
//! Keccak-256 with a canonical output encoding: lowercase hex, fixed width,
//! always carrying the `0x` scheme prefix.

use crate::domain::value_objects::Hash;
use sha3::{Digest, Keccak256};

/// Scheme prefix carried by every hex string this crate emits.
pub const HEX_PREFIX: &str = "0x";

/// Computes keccak256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    Hash::new(Keccak256::digest(data).into())
}

/// Computes keccak256 of `data` and renders it canonically (`0x` + 64 digits).
#[must_use]
pub fn keccak256_hex(data: &[u8]) -> String {
    keccak256(data).to_hex()
}

/// Renders bytes as `0x`-prefixed lowercase hex.
#[must_use]
pub fn prefixed_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(HEX_PREFIX.len() + bytes.len() * 2);
    out.push_str(HEX_PREFIX);
    out.push_str(&hex::encode(bytes));
    out
}

/// Ledger lookup key for a normalized name.
#[must_use]
pub fn name_identifier(normalized_name: &str) -> Hash {
    keccak256(normalized_name.as_bytes())
}
