//! # Value Decoder
//!
//! Total conversion from [`TaggedValue`] to [`GenericValue`].
//!
//! | Tagged | Generic |
//! |--------|---------|
//! | Null, Error, ledger keys | null |
//! | 32/64-bit ints, timepoint, duration | number |
//! | 128-bit | number of the low word |
//! | 256-bit | 0 |
//! | Bytes | base64 text |
//! | String, Symbol | text |
//! | Address, ContractInstance | display text |
//! | Vec | list |
//! | Map | mapping keyed by [`decode_as_display_string`] of each key |
//!
//! 128/256-bit narrowing is lossy. Consumers needing exact large integers
//! must read the [`TaggedValue`] directly.
//!
//! Recursion follows the depth of the input value; no limit is imposed.

use crate::domain::{GenericValue, TaggedValue};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

/// Decode a tagged value into a generic one. Never fails.
pub fn decode(raw: &TaggedValue) -> GenericValue {
    match raw {
        TaggedValue::Null
        | TaggedValue::Error(_)
        | TaggedValue::LedgerKeyContractInstance
        | TaggedValue::LedgerKeyNonce(_) => Value::Null,
        TaggedValue::Bool(b) => Value::Bool(*b),
        TaggedValue::U32(v) => Value::from(*v),
        TaggedValue::I32(v) => Value::from(*v),
        TaggedValue::U64(v) | TaggedValue::Timepoint(v) | TaggedValue::Duration(v) => {
            Value::from(*v)
        }
        TaggedValue::I64(v) => Value::from(*v),
        TaggedValue::U128(parts) => Value::from(parts.lo),
        TaggedValue::I128(parts) => Value::from(parts.lo),
        TaggedValue::U256(_) | TaggedValue::I256(_) => Value::from(0u64),
        TaggedValue::Bytes(data) => Value::String(STANDARD.encode(data)),
        TaggedValue::String(s) | TaggedValue::Symbol(s) => Value::String(s.clone()),
        TaggedValue::Address(addr) => Value::String(addr.to_string()),
        TaggedValue::ContractInstance(instance) => Value::String(instance.to_string()),
        TaggedValue::Vec(items) => Value::Array(items.iter().map(decode).collect()),
        TaggedValue::Map(entries) => {
            let mut mapping = Map::with_capacity(entries.len());
            for (key, val) in entries {
                // Last write wins; the key keeps its first position.
                mapping.insert(decode_as_display_string(key), decode(val));
            }
            Value::Object(mapping)
        }
    }
}

/// String form of a tagged value, used for mapping keys.
///
/// Text-like variants render directly; everything else renders its decoded
/// form when truthy and the empty string otherwise.
pub fn decode_as_display_string(raw: &TaggedValue) -> String {
    match raw {
        TaggedValue::String(s) | TaggedValue::Symbol(s) => s.clone(),
        TaggedValue::Address(addr) => addr.to_string(),
        other => {
            let decoded = decode(other);
            if is_truthy(&decoded) {
                display_string(&decoded)
            } else {
                String::new()
            }
        }
    }
}

/// Truthiness: null, false, 0 and "" are falsy; lists and mappings are not.
pub fn is_truthy(value: &GenericValue) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a generic value as display text.
///
/// Lists join their rendered elements with `,` (null elements render
/// empty); mappings render as compact JSON.
pub fn display_string(value: &GenericValue) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ContractExecutable, ContractInstance, Int128Parts, Int256Parts, ScAddress, ScError,
        ScErrorKind, UInt128Parts, UInt256Parts,
    };
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_primitives() {
        assert_eq!(decode(&TaggedValue::Null), Value::Null);
        assert_eq!(decode(&TaggedValue::Bool(true)), json!(true));
        assert_eq!(decode(&TaggedValue::I32(-5)), json!(-5));
        assert_eq!(decode(&TaggedValue::U64(u64::MAX)), json!(u64::MAX));
        assert_eq!(decode(&TaggedValue::Timepoint(1_700_000_000)), json!(1_700_000_000u64));
        assert_eq!(decode(&TaggedValue::Duration(60)), json!(60));
    }

    #[test]
    fn test_error_decodes_to_null() {
        let err = TaggedValue::Error(ScError {
            kind: ScErrorKind::Contract,
            code: 1,
        });
        assert_eq!(decode(&err), Value::Null);
        assert_eq!(decode(&TaggedValue::LedgerKeyNonce(3)), Value::Null);
    }

    #[test]
    fn test_wide_integers_are_narrowed() {
        let u128 = TaggedValue::U128(UInt128Parts { hi: 9, lo: 42 });
        assert_eq!(decode(&u128), json!(42));

        let i128 = TaggedValue::I128(Int128Parts { hi: -1, lo: 7 });
        assert_eq!(decode(&i128), json!(7));

        let u256 = TaggedValue::U256(UInt256Parts {
            lo_lo: 5,
            ..Default::default()
        });
        assert_eq!(decode(&u256), json!(0));
        assert_eq!(decode(&TaggedValue::I256(Int256Parts::default())), json!(0));
    }

    #[test]
    fn test_bytes_become_base64() {
        assert_eq!(decode(&TaggedValue::Bytes(b"hello".to_vec())), json!("aGVsbG8="));
    }

    #[test]
    fn test_address_and_instance_become_text() {
        let addr = TaggedValue::Address(ScAddress::Account([0u8; 32]));
        assert_eq!(
            decode(&addr),
            json!("GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF")
        );
        let instance = TaggedValue::ContractInstance(ContractInstance {
            executable: ContractExecutable::StellarAsset,
            storage: None,
        });
        assert_eq!(decode(&instance), json!("stellar_asset"));
    }

    #[test]
    fn test_vec_preserves_order() {
        let v1 = TaggedValue::U32(2);
        let v2 = TaggedValue::from("x");
        let list = TaggedValue::Vec(vec![v1.clone(), v2.clone()]);
        assert_eq!(decode(&list), Value::Array(vec![decode(&v1), decode(&v2)]));
    }

    #[test]
    fn test_map_keys_stringified() {
        let map = TaggedValue::Map(vec![
            (TaggedValue::Symbol("note".into()), TaggedValue::from("ok")),
            (TaggedValue::U32(7), TaggedValue::Bool(false)),
            (
                TaggedValue::Address(ScAddress::Account([0u8; 32])),
                TaggedValue::U32(1),
            ),
        ]);
        let decoded = decode(&map);
        assert_eq!(decoded["note"], json!("ok"));
        assert_eq!(decoded["7"], json!(false));
        assert_eq!(
            decoded["GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF"],
            json!(1)
        );
    }

    #[test]
    fn test_map_key_order_and_last_write_wins() {
        let map = TaggedValue::Map(vec![
            (TaggedValue::Symbol("b".into()), TaggedValue::U32(1)),
            (TaggedValue::Symbol("a".into()), TaggedValue::U32(2)),
            (TaggedValue::from("b"), TaggedValue::U32(3)),
        ]);
        let decoded = decode(&map);
        let keys: Vec<&String> = decoded.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(decoded["b"], json!(3));
    }

    #[test]
    fn test_display_string_falsy_keys() {
        assert_eq!(decode_as_display_string(&TaggedValue::U32(0)), "");
        assert_eq!(decode_as_display_string(&TaggedValue::Bool(false)), "");
        assert_eq!(decode_as_display_string(&TaggedValue::Null), "");
        assert_eq!(decode_as_display_string(&TaggedValue::String(String::new())), "");
    }

    #[test]
    fn test_display_string_compound_keys() {
        let list = TaggedValue::Vec(vec![TaggedValue::U32(1), TaggedValue::Null, TaggedValue::U32(2)]);
        assert_eq!(decode_as_display_string(&list), "1,,2");
        assert_eq!(decode_as_display_string(&TaggedValue::Bool(true)), "true");
        let nested = TaggedValue::record([("k", TaggedValue::U32(1))]);
        assert_eq!(decode_as_display_string(&nested), r#"{"k":1}"#);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!(-1)));
    }

    fn arb_tagged_value() -> impl Strategy<Value = TaggedValue> {
        let leaf = prop_oneof![
            Just(TaggedValue::Null),
            any::<bool>().prop_map(TaggedValue::Bool),
            any::<u32>().prop_map(TaggedValue::U32),
            any::<i64>().prop_map(TaggedValue::I64),
            (any::<u64>(), any::<u64>()).prop_map(|(hi, lo)| TaggedValue::U128(UInt128Parts { hi, lo })),
            proptest::collection::vec(any::<u8>(), 0..16).prop_map(TaggedValue::Bytes),
            "[a-z_]{0,12}".prop_map(TaggedValue::Symbol),
            any::<[u8; 32]>().prop_map(|k| TaggedValue::Address(ScAddress::Contract(k))),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..8).prop_map(TaggedValue::Vec),
                proptest::collection::vec((inner.clone(), inner), 0..8).prop_map(TaggedValue::Map),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_decode_is_total_and_deterministic(value in arb_tagged_value()) {
            let first = decode(&value);
            let second = decode(&value);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_decode_survives_wire_roundtrip(value in arb_tagged_value()) {
            let bytes = value.to_xdr().unwrap();
            let parsed = TaggedValue::from_xdr(&bytes).unwrap();
            prop_assert_eq!(decode(&parsed), decode(&value));
        }
    }
}
