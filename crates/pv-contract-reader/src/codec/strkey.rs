//! Strkey: the human-readable form of ledger keys and addresses.
//!
//! `base32(version_byte || payload || crc16_xmodem_le(version_byte || payload))`

use crate::domain::{CodecError, Hash, PublicKeyBytes, ScAddress};
use crc::{Crc, CRC_16_XMODEM};
use data_encoding::BASE32_NOPAD;
use std::fmt;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Version byte (first base32 character) of a strkey.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum StrkeyVersion {
    /// `G...` ed25519 account.
    Account = 6 << 3,
    /// `C...` contract.
    Contract = 2 << 3,
    /// `M...` muxed account.
    MuxedAccount = 12 << 3,
    /// `B...` claimable balance.
    ClaimableBalance = 1 << 3,
    /// `L...` liquidity pool.
    LiquidityPool = 11 << 3,
}

impl StrkeyVersion {
    fn from_byte(byte: u8) -> Option<Self> {
        [
            Self::Account,
            Self::Contract,
            Self::MuxedAccount,
            Self::ClaimableBalance,
            Self::LiquidityPool,
        ]
        .into_iter()
        .find(|v| *v as u8 == byte)
    }

    fn payload_len(self) -> usize {
        match self {
            Self::Account | Self::Contract | Self::LiquidityPool => 32,
            Self::MuxedAccount => 40,
            Self::ClaimableBalance => 33,
        }
    }
}

/// Encode `payload` under `version`.
pub fn encode(version: StrkeyVersion, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 3);
    data.push(version as u8);
    data.extend_from_slice(payload);
    let checksum = CRC16.checksum(&data);
    data.extend_from_slice(&checksum.to_le_bytes());
    BASE32_NOPAD.encode(&data)
}

/// Decode any supported strkey into its version and payload.
pub fn decode(text: &str) -> Result<(StrkeyVersion, Vec<u8>), CodecError> {
    let raw = BASE32_NOPAD
        .decode(text.as_bytes())
        .map_err(|e| CodecError::InvalidStrkey(format!("{}: {}", text, e)))?;
    if raw.len() < 3 {
        return Err(CodecError::InvalidStrkey(format!("{}: too short", text)));
    }

    let (body, checksum) = raw.split_at(raw.len() - 2);
    let expected = CRC16.checksum(body).to_le_bytes();
    if checksum != expected {
        return Err(CodecError::InvalidStrkey(format!("{}: checksum mismatch", text)));
    }

    let version = StrkeyVersion::from_byte(body[0])
        .ok_or_else(|| CodecError::InvalidStrkey(format!("{}: unknown version byte", text)))?;
    let payload = &body[1..];
    if payload.len() != version.payload_len() {
        return Err(CodecError::InvalidStrkey(format!(
            "{}: payload is {} bytes, expected {}",
            text,
            payload.len(),
            version.payload_len()
        )));
    }
    Ok((version, payload.to_vec()))
}

fn decode_32(text: &str, want: StrkeyVersion) -> Result<[u8; 32], CodecError> {
    let (version, payload) = decode(text)?;
    if version != want {
        return Err(CodecError::InvalidStrkey(format!(
            "{}: expected {:?} key, found {:?}",
            text, want, version
        )));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&payload);
    Ok(out)
}

/// Decode a `G...` account key.
pub fn decode_account(text: &str) -> Result<PublicKeyBytes, CodecError> {
    decode_32(text, StrkeyVersion::Account)
}

/// Decode a `C...` contract id.
pub fn decode_contract(text: &str) -> Result<Hash, CodecError> {
    decode_32(text, StrkeyVersion::Contract)
}

impl fmt::Display for ScAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Account(key) => encode(StrkeyVersion::Account, key),
            Self::Contract(hash) => encode(StrkeyVersion::Contract, hash),
            Self::MuxedAccount { id, ed25519 } => {
                let mut payload = Vec::with_capacity(40);
                payload.extend_from_slice(ed25519);
                payload.extend_from_slice(&id.to_be_bytes());
                encode(StrkeyVersion::MuxedAccount, &payload)
            }
            Self::ClaimableBalance(hash) => {
                // Leading byte is the claimable balance id type (v0).
                let mut payload = Vec::with_capacity(33);
                payload.push(0);
                payload.extend_from_slice(hash);
                encode(StrkeyVersion::ClaimableBalance, &payload)
            }
            Self::LiquidityPool(hash) => encode(StrkeyVersion::LiquidityPool, hash),
        };
        f.write_str(&text)
    }
}
