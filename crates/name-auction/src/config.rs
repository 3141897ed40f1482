//! Auction client configuration, with environment overrides.

use crate::domain::DEFAULT_MIN_NAME_LENGTH;
use std::env;

/// Default namespace the registrar owns.
pub const DEFAULT_NAMESPACE_SUFFIX: &str = "eth";

/// Gas budget attached to writes that do not carry their own.
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;

/// Immutable configuration of a name auction client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionConfig {
    /// Names shorter than this (in characters, after normalization) are rejected.
    pub min_name_length: usize,

    /// Namespace suffix whose owner is the registrar.
    pub namespace_suffix: String,

    /// Gas filled into writes whose `TxParams.gas` is `None`.
    pub default_gas_limit: Option<u64>,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            min_name_length: DEFAULT_MIN_NAME_LENGTH,
            namespace_suffix: DEFAULT_NAMESPACE_SUFFIX.to_string(),
            default_gas_limit: Some(DEFAULT_GAS_LIMIT),
        }
    }
}

impl AuctionConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AUCTION_MIN_NAME_LENGTH`: Minimum name length (default: 7)
    /// - `AUCTION_NAMESPACE_SUFFIX`: Registrar namespace (default: eth)
    /// - `AUCTION_DEFAULT_GAS`: Default gas limit, `0` or `none` to disable (default: 500000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            min_name_length: lookup("AUCTION_MIN_NAME_LENGTH")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.min_name_length),

            namespace_suffix: lookup("AUCTION_NAMESPACE_SUFFIX")
                .map(|v| v.trim().to_lowercase())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.namespace_suffix),

            default_gas_limit: match lookup("AUCTION_DEFAULT_GAS") {
                Some(v) if v.trim().eq_ignore_ascii_case("none") => None,
                Some(v) => match v.trim().parse::<u64>() {
                    Ok(0) => None,
                    Ok(gas) => Some(gas),
                    Err(_) => defaults.default_gas_limit,
                },
                None => defaults.default_gas_limit,
            },
        }
    }

    /// Set the minimum name length.
    pub fn with_min_name_length(mut self, min_name_length: usize) -> Self {
        self.min_name_length = min_name_length;
        self
    }

    /// Set the namespace suffix.
    pub fn with_namespace_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.namespace_suffix = suffix.into();
        self
    }

    /// Set (or clear) the default gas limit.
    pub fn with_default_gas_limit(mut self, gas: Option<u64>) -> Self {
        self.default_gas_limit = gas;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AuctionConfig::default();
        assert_eq!(config.min_name_length, 7);
        assert_eq!(config.namespace_suffix, "eth");
        assert_eq!(config.default_gas_limit, Some(500_000));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = AuctionConfig::from_lookup(lookup(&[
            ("AUCTION_MIN_NAME_LENGTH", "3"),
            ("AUCTION_NAMESPACE_SUFFIX", " TEST "),
            ("AUCTION_DEFAULT_GAS", "21000"),
        ]));
        assert_eq!(config.min_name_length, 3);
        assert_eq!(config.namespace_suffix, "test");
        assert_eq!(config.default_gas_limit, Some(21_000));
    }

    #[test]
    fn test_lookup_falls_back_on_garbage() {
        let config = AuctionConfig::from_lookup(lookup(&[
            ("AUCTION_MIN_NAME_LENGTH", "seven"),
            ("AUCTION_NAMESPACE_SUFFIX", ""),
            ("AUCTION_DEFAULT_GAS", "lots"),
        ]));
        assert_eq!(config, AuctionConfig::default());
    }

    #[test]
    fn test_gas_can_be_disabled() {
        for value in ["0", "none", "NONE"] {
            let config = AuctionConfig::from_lookup(lookup(&[("AUCTION_DEFAULT_GAS", value)]));
            assert_eq!(config.default_gas_limit, None);
        }
    }

    #[test]
    fn test_builders() {
        let config = AuctionConfig::default()
            .with_min_name_length(4)
            .with_namespace_suffix("test")
            .with_default_gas_limit(None);
        assert_eq!(config.min_name_length, 4);
        assert_eq!(config.namespace_suffix, "test");
        assert_eq!(config.default_gas_limit, None);
    }
}
