//! # Domain Value Objects
//!
//! Immutable value types shared by the call builder and the mapper.

use super::errors::ReaderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Generic decoded value: null, bool, number, string, list or
/// string-keyed mapping. Mapping keys keep source order.
pub type GenericValue = serde_json::Value;

/// Publicly known account used as the source of simulated calls.
/// It is the all-zero ed25519 key; it is never funded and never signs.
pub const PLACEHOLDER_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Maximum length of a contract symbol.
pub const MAX_SYMBOL_LEN: usize = 32;

/// Known Soroban networks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Network {
    /// Public test network.
    #[default]
    Testnet,
    /// Production network.
    Mainnet,
    /// Preview network for upcoming protocol versions.
    Futurenet,
}

impl Network {
    /// Parse a discriminator. Only the exact canonical names are
    /// recognized; anything else falls back to testnet.
    pub fn from_discriminator(value: &str) -> Self {
        match value {
            "testnet" => Self::Testnet,
            "mainnet" => Self::Mainnet,
            "futurenet" => Self::Futurenet,
            other => {
                warn!(network = %other, "Unknown network discriminator, using testnet");
                Self::Testnet
            }
        }
    }

    /// Canonical discriminator string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
            Self::Futurenet => "futurenet",
        }
    }

    /// Network passphrase; hashed into the network id.
    pub fn passphrase(&self) -> &'static str {
        match self {
            Self::Testnet => "Test SDF Network ; September 2015",
            Self::Mainnet => "Public Global Stellar Network ; September 2015",
            Self::Futurenet => "Test SDF Future Network ; October 2022",
        }
    }

    /// Default public RPC endpoint.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Testnet => "https://soroban-testnet.stellar.org",
            Self::Mainnet => "https://soroban-rpc.mainnet.stellar.org",
            Self::Futurenet => "https://rpc-futurenet.stellar.org",
        }
    }
}

impl From<String> for Network {
    fn from(value: String) -> Self {
        Self::from_discriminator(&value)
    }
}

impl From<Network> for String {
    fn from(value: Network) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated contract symbol (method name).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    /// Validate `name` as a symbol: 1..=32 chars of `[A-Za-z0-9_]`.
    pub fn new(name: &str) -> Result<Self, ReaderError> {
        let valid_chars = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if name.is_empty() || name.len() > MAX_SYMBOL_LEN || !valid_chars {
            return Err(ReaderError::InvalidSymbol(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Symbol text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimal account context needed to address a call envelope.
///
/// Resolved fresh per call; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallerContext {
    /// Account strkey (`G...`).
    pub identity: String,
    /// Current account sequence number.
    pub sequence: i64,
}

impl CallerContext {
    /// Create a context.
    pub fn new(identity: impl Into<String>, sequence: i64) -> Self {
        Self {
            identity: identity.into(),
            sequence,
        }
    }

    /// Inert context for the placeholder account with sequence zero.
    pub fn synthesized() -> Self {
        Self::new(PLACEHOLDER_ACCOUNT, 0)
    }

    /// Sequence number the next transaction from this account carries.
    pub fn next_sequence(&self) -> i64 {
        self.sequence.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_known_discriminators() {
        assert_eq!(Network::from_discriminator("testnet"), Network::Testnet);
        assert_eq!(Network::from_discriminator("mainnet"), Network::Mainnet);
        assert_eq!(Network::from_discriminator("futurenet"), Network::Futurenet);
    }

    #[test]
    fn test_network_aliases_are_not_mainnet() {
        for alias in ["public", "pubnet", "MAINNET", " mainnet "] {
            assert_eq!(Network::from_discriminator(alias), Network::Testnet, "{alias}");
        }
    }

    #[test]
    fn test_unknown_network_falls_back_to_testnet() {
        let network = Network::from_discriminator("devnet");
        assert_eq!(network, Network::Testnet);
        assert_eq!(network.passphrase(), "Test SDF Network ; September 2015");
    }

    #[test]
    fn test_futurenet_has_its_own_passphrase() {
        assert_ne!(
            Network::Futurenet.passphrase(),
            Network::Testnet.passphrase()
        );
    }

    #[test]
    fn test_network_serde_uses_discriminator() {
        let json = serde_json::to_string(&Network::Mainnet).unwrap();
        assert_eq!(json, "\"mainnet\"");
        let parsed: Network = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(parsed, Network::Testnet);
    }

    #[test]
    fn test_symbol_validation() {
        assert!(Symbol::new("get_event").is_ok());
        assert!(Symbol::new("get_product_event_ids").is_ok());
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("has space").is_err());
        assert!(Symbol::new(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_synthesized_caller() {
        let ctx = CallerContext::synthesized();
        assert_eq!(ctx.identity, PLACEHOLDER_ACCOUNT);
        assert_eq!(ctx.sequence, 0);
        assert_eq!(ctx.next_sequence(), 1);
    }
}
