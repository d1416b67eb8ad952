//! # Domain Errors
//!
//! Error types for the contract read client.
//!
//! Two layers: [`CodecError`] for the XDR wire format, and [`ReaderError`]
//! for everything a read can run into between configuration and decoding.

use thiserror::Error;

/// 32-byte hash (contract id, wasm hash, network id, transaction hash).
pub type Hash = [u8; 32];

/// Ed25519 public key bytes.
pub type PublicKeyBytes = [u8; 32];

/// Errors raised while reading or writing XDR.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input ended before a field could be read.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the field required
        needed: usize,
        /// Bytes left in the input
        remaining: usize,
    },

    /// A union discriminant outside the known set.
    #[error("unknown {kind} discriminant: {value}")]
    UnknownDiscriminant {
        /// Which union was being read
        kind: &'static str,
        /// The discriminant found on the wire
        value: u32,
    },

    /// An XDR bool that was neither 0 nor 1.
    #[error("invalid bool encoding: {0}")]
    InvalidBool(u32),

    /// Non-zero bytes in the 4-byte alignment padding.
    #[error("non-zero padding")]
    NonZeroPadding,

    /// A length prefix above the field's declared maximum.
    #[error("length {len} exceeds maximum {max}")]
    LengthExceeded {
        /// Length found on the wire
        len: u32,
        /// Declared maximum
        max: u32,
    },

    /// Bytes left over after a complete value.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// Malformed strkey (bad base32, wrong version byte, checksum mismatch).
    #[error("invalid strkey: {0}")]
    InvalidStrkey(String),

    /// Malformed base64 wrapper.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),
}

/// Contract read client errors.
///
/// Taxonomy:
/// - `Configuration` / `InvalidSymbol`: setup mistakes, surfaced immediately.
/// - `AccountNotFound`: absorbed by the caller resolver.
/// - `Transport` / `Rpc`: the endpoint could not serve the request.
/// - `Simulation` / `Codec`: this particular read produced nothing usable.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Missing or malformed deployment configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Method name that is not a valid contract symbol.
    #[error("Invalid method symbol: {0:?}")]
    InvalidSymbol(String),

    /// HTTP / connection failure talking to the RPC endpoint.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON-RPC error object returned by the endpoint.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Account is not present on the ledger.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Host reported a failed simulation.
    #[error("Simulation failed: {0}")]
    Simulation(String),

    /// Payload could not be decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ReaderError {
    /// True for errors that mean "this read produced nothing" and are
    /// absorbed into an empty or absent result by the domain mapper.
    pub fn is_read_miss(&self) -> bool {
        matches!(self, Self::Simulation(_) | Self::Codec(_))
    }

    /// True for setup mistakes that must never be retried.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidSymbol(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_eof_message() {
        let err = CodecError::UnexpectedEof {
            needed: 8,
            remaining: 3,
        };
        assert!(err.to_string().contains("needed 8"));
    }

    #[test]
    fn test_unknown_discriminant_message() {
        let err = CodecError::UnknownDiscriminant {
            kind: "ScVal",
            value: 99,
        };
        assert_eq!(err.to_string(), "unknown ScVal discriminant: 99");
    }

    #[test]
    fn test_read_miss_classification() {
        assert!(ReaderError::Simulation("trap".into()).is_read_miss());
        assert!(ReaderError::Codec(CodecError::NonZeroPadding).is_read_miss());
        assert!(!ReaderError::Transport("refused".into()).is_read_miss());
        assert!(!ReaderError::Configuration("empty".into()).is_read_miss());
    }

    #[test]
    fn test_configuration_classification() {
        assert!(ReaderError::Configuration("Contract ID not configured".into()).is_configuration());
        assert!(ReaderError::InvalidSymbol("bad name".into()).is_configuration());
        assert!(!ReaderError::AccountNotFound("G...".into()).is_configuration());
    }

    #[test]
    fn test_rpc_error_message() {
        let err = ReaderError::Rpc {
            code: -32602,
            message: "invalid params".into(),
        };
        assert!(err.to_string().contains("-32602"));
    }
}
