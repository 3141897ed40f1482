//! # Domain Errors
//!
//! Error types for the name auction client. Every failure is constructed
//! fresh with the context that caused it.

use super::value_objects::U256;
use thiserror::Error;

/// Errors surfaced by auction operations.
#[derive(Debug, Error)]
pub enum AuctionError {
    /// Normalized name is shorter than the configured minimum.
    #[error("name too short: {name:?} has {length} characters, minimum is {min_length}")]
    NameTooShort {
        /// The normalized name.
        name: String,
        /// Its length in characters.
        length: usize,
        /// Configured minimum.
        min_length: usize,
    },

    /// Deposit does not cover the sealed bid value.
    #[error("insufficient deposit: {deposit} does not cover bid value {value}")]
    InsufficientDeposit {
        /// Value attached to the submit transaction.
        deposit: U256,
        /// True bid value hidden in the commitment.
        value: U256,
    },

    /// Raised by the name normalization collaborator, forwarded unchanged.
    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    /// Raised by the ledger collaborator, forwarded unchanged.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Protocol operation with no defined behavior in this client.
    #[error("operation not supported: {operation}")]
    Unsupported {
        /// Operation name.
        operation: &'static str,
    },
}

impl AuctionError {
    /// Returns true for failures detected locally before any ledger call.
    #[must_use]
    pub fn is_precondition_failure(&self) -> bool {
        matches!(
            self,
            Self::NameTooShort { .. } | Self::InsufficientDeposit { .. }
        )
    }
}

/// Errors from the name normalization collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormalizationError {
    /// Nothing left to register.
    #[error("name is empty")]
    Empty,

    /// A character outside the allowed label alphabet.
    #[error("disallowed character {character:?} at position {position}")]
    DisallowedCharacter {
        /// Offending character.
        character: char,
        /// Character index within the raw name.
        position: usize,
    },
}

/// Errors from the ledger collaborator (transport, revert, malformed reply).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// RPC or network failure.
    #[error("ledger transport error: {0}")]
    Transport(String),

    /// The contract rejected the call.
    #[error("ledger call reverted: {0}")]
    Reverted(String),

    /// The ledger answered with data this client cannot interpret.
    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_too_short_error() {
        let err = AuctionError::NameTooShort {
            name: "foo".to_string(),
            length: 3,
            min_length: 7,
        };
        assert!(err.to_string().contains("\"foo\""));
        assert!(err.to_string().contains("minimum is 7"));
        assert!(err.is_precondition_failure());
    }

    #[test]
    fn test_insufficient_deposit_error() {
        let err = AuctionError::InsufficientDeposit {
            deposit: U256::from(5),
            value: U256::from(10),
        };
        assert!(err.to_string().contains("does not cover bid value 10"));
        assert!(err.is_precondition_failure());
    }

    #[test]
    fn test_collaborator_errors_forwarded_unchanged() {
        let inner = LedgerError::Reverted("no matching sealed bid".to_string());
        let err: AuctionError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert!(!err.is_precondition_failure());

        let inner = NormalizationError::DisallowedCharacter {
            character: '.',
            position: 3,
        };
        let err: AuctionError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn test_unsupported_error() {
        let err = AuctionError::Unsupported {
            operation: "transfer",
        };
        assert_eq!(err.to_string(), "operation not supported: transfer");
    }
}
