//! `ScVal` binary codec.
//!
//! One read arm and one write arm per variant; `Vec` and `Map` recurse and
//! build the parent only after every child is decoded.

use super::xdr::{XdrReader, XdrWriter};
use crate::domain::{
    CodecError, ContractExecutable, ContractInstance, Int128Parts, Int256Parts, ScAddress,
    ScError, ScErrorKind, TaggedValue, UInt128Parts, UInt256Parts,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// `ScVal` discriminants.
#[allow(missing_docs)]
pub mod tags {
    pub const BOOL: u32 = 0;
    pub const VOID: u32 = 1;
    pub const ERROR: u32 = 2;
    pub const U32: u32 = 3;
    pub const I32: u32 = 4;
    pub const U64: u32 = 5;
    pub const I64: u32 = 6;
    pub const TIMEPOINT: u32 = 7;
    pub const DURATION: u32 = 8;
    pub const U128: u32 = 9;
    pub const I128: u32 = 10;
    pub const U256: u32 = 11;
    pub const I256: u32 = 12;
    pub const BYTES: u32 = 13;
    pub const STRING: u32 = 14;
    pub const SYMBOL: u32 = 15;
    pub const VEC: u32 = 16;
    pub const MAP: u32 = 17;
    pub const ADDRESS: u32 = 18;
    pub const CONTRACT_INSTANCE: u32 = 19;
    pub const LEDGER_KEY_CONTRACT_INSTANCE: u32 = 20;
    pub const LEDGER_KEY_NONCE: u32 = 21;
}

/// Maximum symbol length on the wire.
const SCSYMBOL_LIMIT: u32 = 32;

/// Smallest possible encoded `ScVal` (a bare discriminant).
const MIN_SCVAL_SIZE: usize = 4;

const SC_ADDRESS_ACCOUNT: u32 = 0;
const SC_ADDRESS_CONTRACT: u32 = 1;
const SC_ADDRESS_MUXED_ACCOUNT: u32 = 2;
const SC_ADDRESS_CLAIMABLE_BALANCE: u32 = 3;
const SC_ADDRESS_LIQUIDITY_POOL: u32 = 4;

const PUBLIC_KEY_TYPE_ED25519: u32 = 0;
const CLAIMABLE_BALANCE_ID_V0: u32 = 0;

const EXECUTABLE_WASM: u32 = 0;
const EXECUTABLE_STELLAR_ASSET: u32 = 1;

impl TaggedValue {
    /// Decode one value that spans all of `bytes`.
    pub fn from_xdr(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut reader = XdrReader::new(bytes);
        let value = read_scval(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }

    /// Decode a base64-wrapped value.
    pub fn from_xdr_base64(text: &str) -> Result<Self, CodecError> {
        let bytes = STANDARD
            .decode(text.trim())
            .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;
        Self::from_xdr(&bytes)
    }

    /// Encode to XDR.
    pub fn to_xdr(&self) -> Result<Vec<u8>, CodecError> {
        let mut writer = XdrWriter::new();
        write_scval(&mut writer, self)?;
        Ok(writer.into_bytes())
    }

    /// Encode to base64 XDR.
    pub fn to_xdr_base64(&self) -> Result<String, CodecError> {
        Ok(STANDARD.encode(self.to_xdr()?))
    }
}

/// Read one `ScVal`.
pub fn read_scval(r: &mut XdrReader<'_>) -> Result<TaggedValue, CodecError> {
    let tag = r.read_u32()?;
    let value = match tag {
        tags::BOOL => TaggedValue::Bool(r.read_bool()?),
        tags::VOID => TaggedValue::Null,
        tags::ERROR => TaggedValue::Error(read_sc_error(r)?),
        tags::U32 => TaggedValue::U32(r.read_u32()?),
        tags::I32 => TaggedValue::I32(r.read_i32()?),
        tags::U64 => TaggedValue::U64(r.read_u64()?),
        tags::I64 => TaggedValue::I64(r.read_i64()?),
        tags::TIMEPOINT => TaggedValue::Timepoint(r.read_u64()?),
        tags::DURATION => TaggedValue::Duration(r.read_u64()?),
        tags::U128 => TaggedValue::U128(UInt128Parts {
            hi: r.read_u64()?,
            lo: r.read_u64()?,
        }),
        tags::I128 => TaggedValue::I128(Int128Parts {
            hi: r.read_i64()?,
            lo: r.read_u64()?,
        }),
        tags::U256 => TaggedValue::U256(UInt256Parts {
            hi_hi: r.read_u64()?,
            hi_lo: r.read_u64()?,
            lo_hi: r.read_u64()?,
            lo_lo: r.read_u64()?,
        }),
        tags::I256 => TaggedValue::I256(Int256Parts {
            hi_hi: r.read_i64()?,
            hi_lo: r.read_u64()?,
            lo_hi: r.read_u64()?,
            lo_lo: r.read_u64()?,
        }),
        tags::BYTES => TaggedValue::Bytes(r.read_var_opaque(None)?),
        tags::STRING => TaggedValue::String(r.read_string(None)?),
        tags::SYMBOL => TaggedValue::Symbol(r.read_string(Some(SCSYMBOL_LIMIT))?),
        tags::VEC => {
            // Absent vec decodes as empty.
            let items = if r.read_bool()? {
                read_vec_body(r)?
            } else {
                Vec::new()
            };
            TaggedValue::Vec(items)
        }
        tags::MAP => {
            let entries = if r.read_bool()? {
                read_map_body(r)?
            } else {
                Vec::new()
            };
            TaggedValue::Map(entries)
        }
        tags::ADDRESS => TaggedValue::Address(read_sc_address(r)?),
        tags::CONTRACT_INSTANCE => TaggedValue::ContractInstance(read_contract_instance(r)?),
        tags::LEDGER_KEY_CONTRACT_INSTANCE => TaggedValue::LedgerKeyContractInstance,
        tags::LEDGER_KEY_NONCE => TaggedValue::LedgerKeyNonce(r.read_i64()?),
        other => {
            return Err(CodecError::UnknownDiscriminant {
                kind: "ScVal",
                value: other,
            })
        }
    };
    Ok(value)
}

fn read_vec_body(r: &mut XdrReader<'_>) -> Result<Vec<TaggedValue>, CodecError> {
    let count = r.read_count(MIN_SCVAL_SIZE)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(read_scval(r)?);
    }
    Ok(items)
}

fn read_map_body(r: &mut XdrReader<'_>) -> Result<Vec<(TaggedValue, TaggedValue)>, CodecError> {
    let count = r.read_count(2 * MIN_SCVAL_SIZE)?;
    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let key = read_scval(r)?;
        let val = read_scval(r)?;
        entries.push((key, val));
    }
    Ok(entries)
}

fn read_sc_error(r: &mut XdrReader<'_>) -> Result<ScError, CodecError> {
    let raw_kind = r.read_u32()?;
    let kind = ScErrorKind::from_u32(raw_kind).ok_or(CodecError::UnknownDiscriminant {
        kind: "ScErrorType",
        value: raw_kind,
    })?;
    // Contract errors carry a u32 code, host errors an enum; both are one word.
    let code = r.read_u32()?;
    Ok(ScError { kind, code })
}

/// Read a `PublicKey` (ed25519 only).
pub fn read_ed25519(r: &mut XdrReader<'_>) -> Result<[u8; 32], CodecError> {
    match r.read_u32()? {
        PUBLIC_KEY_TYPE_ED25519 => r.read_fixed::<32>(),
        other => Err(CodecError::UnknownDiscriminant {
            kind: "PublicKeyType",
            value: other,
        }),
    }
}

/// Read an `ScAddress`.
pub fn read_sc_address(r: &mut XdrReader<'_>) -> Result<ScAddress, CodecError> {
    match r.read_u32()? {
        SC_ADDRESS_ACCOUNT => Ok(ScAddress::Account(read_ed25519(r)?)),
        SC_ADDRESS_CONTRACT => Ok(ScAddress::Contract(r.read_fixed::<32>()?)),
        SC_ADDRESS_MUXED_ACCOUNT => {
            let id = r.read_u64()?;
            let ed25519 = r.read_fixed::<32>()?;
            Ok(ScAddress::MuxedAccount { id, ed25519 })
        }
        SC_ADDRESS_CLAIMABLE_BALANCE => match r.read_u32()? {
            CLAIMABLE_BALANCE_ID_V0 => Ok(ScAddress::ClaimableBalance(r.read_fixed::<32>()?)),
            other => Err(CodecError::UnknownDiscriminant {
                kind: "ClaimableBalanceIDType",
                value: other,
            }),
        },
        SC_ADDRESS_LIQUIDITY_POOL => Ok(ScAddress::LiquidityPool(r.read_fixed::<32>()?)),
        other => Err(CodecError::UnknownDiscriminant {
            kind: "ScAddressType",
            value: other,
        }),
    }
}

fn read_contract_instance(r: &mut XdrReader<'_>) -> Result<ContractInstance, CodecError> {
    let executable = match r.read_u32()? {
        EXECUTABLE_WASM => ContractExecutable::Wasm(r.read_fixed::<32>()?),
        EXECUTABLE_STELLAR_ASSET => ContractExecutable::StellarAsset,
        other => {
            return Err(CodecError::UnknownDiscriminant {
                kind: "ContractExecutableType",
                value: other,
            })
        }
    };
    let storage = if r.read_bool()? {
        Some(read_map_body(r)?)
    } else {
        None
    };
    Ok(ContractInstance {
        executable,
        storage,
    })
}

/// Write one `ScVal`.
pub fn write_scval(w: &mut XdrWriter, value: &TaggedValue) -> Result<(), CodecError> {
    match value {
        TaggedValue::Bool(b) => {
            w.write_u32(tags::BOOL);
            w.write_bool(*b);
        }
        TaggedValue::Null => w.write_u32(tags::VOID),
        TaggedValue::Error(err) => {
            w.write_u32(tags::ERROR);
            w.write_u32(err.kind as u32);
            w.write_u32(err.code);
        }
        TaggedValue::U32(v) => {
            w.write_u32(tags::U32);
            w.write_u32(*v);
        }
        TaggedValue::I32(v) => {
            w.write_u32(tags::I32);
            w.write_i32(*v);
        }
        TaggedValue::U64(v) => {
            w.write_u32(tags::U64);
            w.write_u64(*v);
        }
        TaggedValue::I64(v) => {
            w.write_u32(tags::I64);
            w.write_i64(*v);
        }
        TaggedValue::Timepoint(v) => {
            w.write_u32(tags::TIMEPOINT);
            w.write_u64(*v);
        }
        TaggedValue::Duration(v) => {
            w.write_u32(tags::DURATION);
            w.write_u64(*v);
        }
        TaggedValue::U128(parts) => {
            w.write_u32(tags::U128);
            w.write_u64(parts.hi);
            w.write_u64(parts.lo);
        }
        TaggedValue::I128(parts) => {
            w.write_u32(tags::I128);
            w.write_i64(parts.hi);
            w.write_u64(parts.lo);
        }
        TaggedValue::U256(parts) => {
            w.write_u32(tags::U256);
            w.write_u64(parts.hi_hi);
            w.write_u64(parts.hi_lo);
            w.write_u64(parts.lo_hi);
            w.write_u64(parts.lo_lo);
        }
        TaggedValue::I256(parts) => {
            w.write_u32(tags::I256);
            w.write_i64(parts.hi_hi);
            w.write_u64(parts.hi_lo);
            w.write_u64(parts.lo_hi);
            w.write_u64(parts.lo_lo);
        }
        TaggedValue::Bytes(data) => {
            w.write_u32(tags::BYTES);
            w.write_var_opaque(data, None)?;
        }
        TaggedValue::String(s) => {
            w.write_u32(tags::STRING);
            w.write_var_opaque(s.as_bytes(), None)?;
        }
        TaggedValue::Symbol(s) => {
            w.write_u32(tags::SYMBOL);
            w.write_var_opaque(s.as_bytes(), Some(SCSYMBOL_LIMIT))?;
        }
        TaggedValue::Vec(items) => {
            w.write_u32(tags::VEC);
            w.write_bool(true);
            write_vec_body(w, items)?;
        }
        TaggedValue::Map(entries) => {
            w.write_u32(tags::MAP);
            w.write_bool(true);
            write_map_body(w, entries)?;
        }
        TaggedValue::Address(addr) => {
            w.write_u32(tags::ADDRESS);
            write_sc_address(w, addr);
        }
        TaggedValue::ContractInstance(instance) => {
            w.write_u32(tags::CONTRACT_INSTANCE);
            match &instance.executable {
                ContractExecutable::Wasm(hash) => {
                    w.write_u32(EXECUTABLE_WASM);
                    w.write_fixed(hash);
                }
                ContractExecutable::StellarAsset => w.write_u32(EXECUTABLE_STELLAR_ASSET),
            }
            match &instance.storage {
                Some(entries) => {
                    w.write_bool(true);
                    write_map_body(w, entries)?;
                }
                None => w.write_bool(false),
            }
        }
        TaggedValue::LedgerKeyContractInstance => w.write_u32(tags::LEDGER_KEY_CONTRACT_INSTANCE),
        TaggedValue::LedgerKeyNonce(nonce) => {
            w.write_u32(tags::LEDGER_KEY_NONCE);
            w.write_i64(*nonce);
        }
    }
    Ok(())
}

/// Write the body of an `ScVec` (count + items).
pub fn write_vec_body(w: &mut XdrWriter, items: &[TaggedValue]) -> Result<(), CodecError> {
    w.write_count(items.len(), None)?;
    for item in items {
        write_scval(w, item)?;
    }
    Ok(())
}

fn write_map_body(w: &mut XdrWriter, entries: &[(TaggedValue, TaggedValue)]) -> Result<(), CodecError> {
    w.write_count(entries.len(), None)?;
    for (key, val) in entries {
        write_scval(w, key)?;
        write_scval(w, val)?;
    }
    Ok(())
}

/// Write an `ScAddress`.
pub fn write_sc_address(w: &mut XdrWriter, addr: &ScAddress) {
    match addr {
        ScAddress::Account(key) => {
            w.write_u32(SC_ADDRESS_ACCOUNT);
            w.write_u32(PUBLIC_KEY_TYPE_ED25519);
            w.write_fixed(key);
        }
        ScAddress::Contract(hash) => {
            w.write_u32(SC_ADDRESS_CONTRACT);
            w.write_fixed(hash);
        }
        ScAddress::MuxedAccount { id, ed25519 } => {
            w.write_u32(SC_ADDRESS_MUXED_ACCOUNT);
            w.write_u64(*id);
            w.write_fixed(ed25519);
        }
        ScAddress::ClaimableBalance(hash) => {
            w.write_u32(SC_ADDRESS_CLAIMABLE_BALANCE);
            w.write_u32(CLAIMABLE_BALANCE_ID_V0);
            w.write_fixed(hash);
        }
        ScAddress::LiquidityPool(hash) => {
            w.write_u32(SC_ADDRESS_LIQUIDITY_POOL);
            w.write_fixed(hash);
        }
    }
}
