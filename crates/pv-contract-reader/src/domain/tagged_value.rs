//! # Tagged Values
//!
//! The self-describing contract value (`ScVal` on the wire). Exactly one
//! variant is active per value; `Vec` and `Map` are the only recursive ones.

use super::errors::{Hash, PublicKeyBytes};
use std::fmt;

/// Unsigned 128-bit integer as transported (two 64-bit words).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UInt128Parts {
    /// High word.
    pub hi: u64,
    /// Low word.
    pub lo: u64,
}

/// Signed 128-bit integer as transported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Int128Parts {
    /// High word (carries the sign).
    pub hi: i64,
    /// Low word.
    pub lo: u64,
}

/// Unsigned 256-bit integer as transported (four 64-bit words).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct UInt256Parts {
    /// Bits 192..256.
    pub hi_hi: u64,
    /// Bits 128..192.
    pub hi_lo: u64,
    /// Bits 64..128.
    pub lo_hi: u64,
    /// Bits 0..64.
    pub lo_lo: u64,
}

/// Signed 256-bit integer as transported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Int256Parts {
    /// Bits 192..256 (carries the sign).
    pub hi_hi: i64,
    /// Bits 128..192.
    pub hi_lo: u64,
    /// Bits 64..128.
    pub lo_hi: u64,
    /// Bits 0..64.
    pub lo_lo: u64,
}

/// Category of a host/contract error value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ScErrorKind {
    /// Error raised by contract code (code is contract-defined).
    Contract = 0,
    /// Wasm VM failure.
    WasmVm = 1,
    /// Host context failure.
    Context = 2,
    /// Storage failure.
    Storage = 3,
    /// Host object failure.
    Object = 4,
    /// Crypto failure.
    Crypto = 5,
    /// Event failure.
    Events = 6,
    /// Budget exhausted.
    Budget = 7,
    /// Value conversion failure.
    Value = 8,
    /// Authorization failure.
    Auth = 9,
}

impl ScErrorKind {
    /// Map a wire discriminant to a kind.
    pub fn from_u32(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::Contract,
            1 => Self::WasmVm,
            2 => Self::Context,
            3 => Self::Storage,
            4 => Self::Object,
            5 => Self::Crypto,
            6 => Self::Events,
            7 => Self::Budget,
            8 => Self::Value,
            9 => Self::Auth,
            _ => return None,
        })
    }
}

/// Error value carried inside a tagged value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScError {
    /// Error category.
    pub kind: ScErrorKind,
    /// Contract code for `Contract`, host error code otherwise.
    pub code: u32,
}

/// On-ledger address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScAddress {
    /// Classic ed25519 account (`G...`).
    Account(PublicKeyBytes),
    /// Contract (`C...`).
    Contract(Hash),
    /// Multiplexed account (`M...`).
    MuxedAccount {
        /// Multiplexing id.
        id: u64,
        /// Underlying account key.
        ed25519: PublicKeyBytes,
    },
    /// Claimable balance (`B...`).
    ClaimableBalance(Hash),
    /// Liquidity pool (`L...`).
    LiquidityPool(Hash),
}

/// Code backing a contract instance.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ContractExecutable {
    /// Uploaded wasm, identified by its hash.
    Wasm(Hash),
    /// Built-in Stellar asset contract.
    StellarAsset,
}

/// Contract instance value (executable plus instance storage).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContractInstance {
    /// What code runs for this instance.
    pub executable: ContractExecutable,
    /// Instance storage, if any.
    pub storage: Option<Vec<(TaggedValue, TaggedValue)>>,
}

impl fmt::Display for ContractInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.executable {
            ContractExecutable::Wasm(hash) => write!(f, "wasm:{}", hex::encode(hash)),
            ContractExecutable::StellarAsset => f.write_str("stellar_asset"),
        }
    }
}

/// Self-describing contract value.
///
/// 128/256-bit integers keep their full words here; narrowing happens only
/// when decoding into a generic value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TaggedValue {
    /// Void.
    Null,
    /// Boolean.
    Bool(bool),
    /// Host or contract error.
    Error(ScError),
    /// Unsigned 32-bit.
    U32(u32),
    /// Signed 32-bit.
    I32(i32),
    /// Unsigned 64-bit.
    U64(u64),
    /// Signed 64-bit.
    I64(i64),
    /// Point in time (unix seconds).
    Timepoint(u64),
    /// Span of time (seconds).
    Duration(u64),
    /// Unsigned 128-bit.
    U128(UInt128Parts),
    /// Signed 128-bit.
    I128(Int128Parts),
    /// Unsigned 256-bit.
    U256(UInt256Parts),
    /// Signed 256-bit.
    I256(Int256Parts),
    /// Byte blob.
    Bytes(Vec<u8>),
    /// Text string.
    String(String),
    /// Short identifier.
    Symbol(String),
    /// Ordered list.
    Vec(Vec<TaggedValue>),
    /// Ordered key/value pairs.
    Map(Vec<(TaggedValue, TaggedValue)>),
    /// Address.
    Address(ScAddress),
    /// Contract instance.
    ContractInstance(ContractInstance),
    /// Ledger key of a contract instance (storage-internal).
    LedgerKeyContractInstance,
    /// Ledger key of an auth nonce (storage-internal).
    LedgerKeyNonce(i64),
}

impl TaggedValue {
    /// Short variant name, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "void",
            Self::Bool(_) => "bool",
            Self::Error(_) => "error",
            Self::U32(_) => "u32",
            Self::I32(_) => "i32",
            Self::U64(_) => "u64",
            Self::I64(_) => "i64",
            Self::Timepoint(_) => "timepoint",
            Self::Duration(_) => "duration",
            Self::U128(_) => "u128",
            Self::I128(_) => "i128",
            Self::U256(_) => "u256",
            Self::I256(_) => "i256",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Vec(_) => "vec",
            Self::Map(_) => "map",
            Self::Address(_) => "address",
            Self::ContractInstance(_) => "contract_instance",
            Self::LedgerKeyContractInstance => "ledger_key_contract_instance",
            Self::LedgerKeyNonce(_) => "ledger_key_nonce",
        }
    }

    /// Build a symbol-keyed map, the shape contract structs take on the wire.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, TaggedValue)>) -> Self {
        Self::Map(
            fields
                .into_iter()
                .map(|(k, v)| (Self::Symbol(k.into()), v))
                .collect(),
        )
    }
}

impl From<bool> for TaggedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for TaggedValue {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<i32> for TaggedValue {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}

impl From<u64> for TaggedValue {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<i64> for TaggedValue {
    fn from(value: i64) -> Self {
        Self::I64(value)
    }
}

impl From<&str> for TaggedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for TaggedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<ScAddress> for TaggedValue {
    fn from(value: ScAddress) -> Self {
        Self::Address(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_instance_display() {
        let wasm = ContractInstance {
            executable: ContractExecutable::Wasm([0xAB; 32]),
            storage: None,
        };
        assert_eq!(wasm.to_string(), format!("wasm:{}", "ab".repeat(32)));

        let sac = ContractInstance {
            executable: ContractExecutable::StellarAsset,
            storage: Some(vec![]),
        };
        assert_eq!(sac.to_string(), "stellar_asset");
    }

    #[test]
    fn test_record_builds_symbol_keys() {
        let rec = TaggedValue::record([("note", TaggedValue::from("hi"))]);
        match rec {
            TaggedValue::Map(pairs) => {
                assert_eq!(pairs[0].0, TaggedValue::Symbol("note".into()));
            }
            other => panic!("expected map, got {}", other.kind_name()),
        }
    }

    #[test]
    fn test_error_kind_roundtrip() {
        assert_eq!(ScErrorKind::from_u32(7), Some(ScErrorKind::Budget));
        assert_eq!(ScErrorKind::from_u32(10), None);
    }
}
