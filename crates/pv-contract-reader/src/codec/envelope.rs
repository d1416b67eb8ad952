//! Transaction envelope and ledger-key encoding for simulated calls.
//!
//! Only the shapes this client produces are modelled: a V1 envelope with one
//! `InvokeHostFunction` operation, no memo, a time-bound precondition and no
//! signatures.

use super::scval::{read_ed25519, write_sc_address, write_vec_body};
use super::strkey;
use super::xdr::{XdrReader, XdrWriter};
use crate::domain::{CallerContext, CodecError, Hash, ScAddress, SimulatedCall};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

const ENVELOPE_TYPE_TX: u32 = 2;
const KEY_TYPE_ED25519: u32 = 0;
const PUBLIC_KEY_TYPE_ED25519: u32 = 0;
const PRECOND_TIME: u32 = 1;
const MEMO_NONE: u32 = 0;
const OP_INVOKE_HOST_FUNCTION: u32 = 24;
const HOST_FUNCTION_TYPE_INVOKE_CONTRACT: u32 = 0;
const LEDGER_ENTRY_TYPE_ACCOUNT: u32 = 0;

const MAX_OPS_PER_TX: u32 = 100;
const MAX_SIGNATURES: u32 = 20;
const SCSYMBOL_LIMIT: u32 = 32;

/// `sha256(passphrase)`.
pub fn network_id(passphrase: &str) -> Hash {
    Sha256::digest(passphrase.as_bytes()).into()
}

fn write_transaction(w: &mut XdrWriter, call: &SimulatedCall) -> Result<(), CodecError> {
    let source_key = strkey::decode_account(&call.source.identity)?;

    // sourceAccount (MuxedAccount, plain ed25519 arm)
    w.write_u32(KEY_TYPE_ED25519);
    w.write_fixed(&source_key);
    w.write_u32(call.fee);
    w.write_i64(call.source.next_sequence());

    // cond: time bounds [0, valid_until]
    w.write_u32(PRECOND_TIME);
    w.write_u64(0);
    w.write_u64(call.valid_until);

    w.write_u32(MEMO_NONE);

    w.write_count(1, Some(MAX_OPS_PER_TX))?;
    w.write_bool(false); // operation source: inherit
    w.write_u32(OP_INVOKE_HOST_FUNCTION);
    w.write_u32(HOST_FUNCTION_TYPE_INVOKE_CONTRACT);
    write_sc_address(w, &ScAddress::Contract(call.contract_hash));
    w.write_var_opaque(call.method.as_str().as_bytes(), Some(SCSYMBOL_LIMIT))?;
    write_vec_body(w, &call.args)?;
    w.write_count(0, None)?; // auth entries: filled in by simulation

    w.write_u32(0); // ext v0
    Ok(())
}

/// Encode the `Transaction` body.
pub fn encode_transaction(call: &SimulatedCall) -> Result<Vec<u8>, CodecError> {
    let mut w = XdrWriter::new();
    write_transaction(&mut w, call)?;
    Ok(w.into_bytes())
}

/// Encode an unsigned `TransactionEnvelope`.
pub fn encode_envelope(call: &SimulatedCall) -> Result<Vec<u8>, CodecError> {
    let mut w = XdrWriter::new();
    w.write_u32(ENVELOPE_TYPE_TX);
    write_transaction(&mut w, call)?;
    w.write_count(0, Some(MAX_SIGNATURES))?;
    Ok(w.into_bytes())
}

/// Hash of the transaction under the call's network.
pub fn transaction_hash(call: &SimulatedCall) -> Result<Hash, CodecError> {
    let tx = encode_transaction(call)?;
    let mut hasher = Sha256::new();
    hasher.update(network_id(call.network.passphrase()));
    hasher.update(ENVELOPE_TYPE_TX.to_be_bytes());
    hasher.update(&tx);
    Ok(hasher.finalize().into())
}

impl SimulatedCall {
    /// XDR-encoded `TransactionEnvelope`.
    pub fn envelope_xdr(&self) -> Result<Vec<u8>, CodecError> {
        encode_envelope(self)
    }

    /// Base64 `TransactionEnvelope`, as the RPC expects it.
    pub fn envelope_xdr_base64(&self) -> Result<String, CodecError> {
        Ok(STANDARD.encode(self.envelope_xdr()?))
    }

    /// Network-bound transaction hash.
    pub fn hash(&self) -> Result<Hash, CodecError> {
        transaction_hash(self)
    }
}

/// Base64 `LedgerKey` of an account, for `getLedgerEntries`.
pub fn account_ledger_key(account_id: &str) -> Result<String, CodecError> {
    let key = strkey::decode_account(account_id)?;
    let mut w = XdrWriter::new();
    w.write_u32(LEDGER_ENTRY_TYPE_ACCOUNT);
    w.write_u32(PUBLIC_KEY_TYPE_ED25519);
    w.write_fixed(&key);
    Ok(STANDARD.encode(w.into_bytes()))
}

/// Read the account id and sequence number out of base64 `LedgerEntryData`.
/// Fields after the sequence number are ignored.
pub fn read_account_entry(entry_b64: &str) -> Result<CallerContext, CodecError> {
    let bytes = STANDARD
        .decode(entry_b64.trim())
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))?;
    let mut r = XdrReader::new(&bytes);

    let entry_type = r.read_u32()?;
    if entry_type != LEDGER_ENTRY_TYPE_ACCOUNT {
        return Err(CodecError::UnknownDiscriminant {
            kind: "LedgerEntryType",
            value: entry_type,
        });
    }
    let key = read_ed25519(&mut r)?;
    let _balance = r.read_i64()?;
    let sequence = r.read_i64()?;

    Ok(CallerContext::new(
        ScAddress::Account(key).to_string(),
        sequence,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Network, Symbol, TaggedValue, BASE_FEE, CALL_TIMEOUT_SECS};

    const CONTRACT: &str = "CAAACAQDAQCQMBYIBEFAWDANBYHRAEISCMKBKFQXDAMRUGY4DUPB6N4O";

    fn sample_call(network: Network) -> SimulatedCall {
        SimulatedCall {
            contract_id: CONTRACT.to_string(),
            contract_hash: strkey::decode_contract(CONTRACT).unwrap(),
            method: Symbol::new("get_event").unwrap(),
            args: vec![TaggedValue::U64(3)],
            fee: BASE_FEE,
            network,
            timeout_secs: CALL_TIMEOUT_SECS,
            valid_until: 1_700_000_030,
            source: CallerContext::synthesized(),
        }
    }

    #[test]
    fn test_envelope_layout() {
        let bytes = encode_envelope(&sample_call(Network::Testnet)).unwrap();
        // envelope type, then muxed ed25519 source of all zeros
        assert_eq!(&bytes[0..4], &[0, 0, 0, 2]);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert!(bytes[8..40].iter().all(|b| *b == 0));
        // fee 100
        assert_eq!(&bytes[40..44], &100u32.to_be_bytes());
        // sequence = 0 + 1
        assert_eq!(&bytes[44..52], &1i64.to_be_bytes());
        // PRECOND_TIME, min 0, max valid_until
        assert_eq!(&bytes[52..56], &[0, 0, 0, 1]);
        assert_eq!(&bytes[64..72], &1_700_000_030u64.to_be_bytes());
        // no signatures
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_envelope_embeds_method_and_args() {
        let bytes = encode_envelope(&sample_call(Network::Testnet)).unwrap();
        let method = b"get_event";
        assert!(bytes.windows(method.len()).any(|w| w == method));
        let arg = TaggedValue::U64(3).to_xdr().unwrap();
        assert!(bytes.windows(arg.len()).any(|w| w == arg.as_slice()));
    }

    #[test]
    fn test_call_envelope_helpers() {
        let call = sample_call(Network::Testnet);
        let bytes = call.envelope_xdr().unwrap();
        assert_eq!(bytes, encode_envelope(&call).unwrap());
        assert_eq!(STANDARD.decode(call.envelope_xdr_base64().unwrap()).unwrap(), bytes);
        assert_eq!(call.hash().unwrap(), transaction_hash(&call).unwrap());
    }

    #[test]
    fn test_hash_depends_on_network() {
        let testnet = transaction_hash(&sample_call(Network::Testnet)).unwrap();
        let mainnet = transaction_hash(&sample_call(Network::Mainnet)).unwrap();
        assert_ne!(testnet, mainnet);
        assert_eq!(
            testnet,
            transaction_hash(&sample_call(Network::Testnet)).unwrap()
        );
    }

    #[test]
    fn test_testnet_network_id() {
        assert_eq!(
            hex::encode(network_id(Network::Testnet.passphrase())),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
    }

    #[test]
    fn test_invalid_source_identity() {
        let mut call = sample_call(Network::Testnet);
        call.source.identity = "nonsense".into();
        assert!(encode_envelope(&call).is_err());
    }

    #[test]
    fn test_account_entry_parse() {
        let mut w = XdrWriter::new();
        w.write_u32(LEDGER_ENTRY_TYPE_ACCOUNT);
        w.write_u32(PUBLIC_KEY_TYPE_ED25519);
        w.write_fixed(&[0u8; 32]);
        w.write_i64(10_000_000); // balance
        w.write_i64(4_294_967_296); // seqNum
        w.write_u32(0); // numSubEntries, ignored
        let entry = STANDARD.encode(w.into_bytes());

        let ctx = read_account_entry(&entry).unwrap();
        assert_eq!(ctx.identity, crate::domain::PLACEHOLDER_ACCOUNT);
        assert_eq!(ctx.sequence, 4_294_967_296);
    }

    #[test]
    fn test_account_ledger_key_layout() {
        let key = account_ledger_key(crate::domain::PLACEHOLDER_ACCOUNT).unwrap();
        let bytes = STANDARD.decode(key).unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[..8], &[0u8; 8]);
    }

    #[test]
    fn test_non_account_entry_rejected() {
        let entry = STANDARD.encode([0, 0, 0, 6]);
        assert!(matches!(
            read_account_entry(&entry),
            Err(CodecError::UnknownDiscriminant { value: 6, .. })
        ));
    }
}
