use alloc::{format, string::String, vec, vec::Vec};

use super::{Child, Network, Sample, TxHash, decode_nested};
use crate::{Reader, from_bytes, from_slice, read_array};

const SAMPLE: &str = r#"
{
    "children": [ { "depth": -3, "id": "0A0b0C0d" } ],
    "tags": [],
    "network": "stagenet",
    "unused": { "nested": [1, 2.5, "x", null, true] },
    "name": "café",
    "ratio": -1.5e-2,
    "wide": 18446744073709551615,
    "signed": -2147483648,
    "small": 255,
    "flag": false
}
"#;

#[test]
fn members_decode_in_any_order() {
    let sample: Sample = from_bytes(SAMPLE).unwrap();
    assert_eq!(
        sample,
        Sample {
            flag: false,
            small: 255,
            signed: i32::MIN,
            wide: u64::MAX,
            ratio: -0.015,
            name: "café".into(),
            network: Network::Stagenet,
            tags: vec![],
            children: vec![Child {
                id: [0x0a, 0x0b, 0x0c, 0x0d],
                depth: -3,
            }],
        }
    );
}

#[test]
fn unknown_keys_are_ignored() {
    let hash = "ab".repeat(32);
    let json = format!(r#"{{"tx_hash":"{hash}","extra":123}}"#);
    let entry: TxHash = from_slice(json.as_bytes()).unwrap();
    assert_eq!(entry.tx_hash, [0xab; 32]);
}

#[test]
fn unknown_keys_may_repeat() {
    let hash = "00".repeat(32);
    let json = format!(r#"{{"x":1,"tx_hash":"{hash}","x":{{"x":[]}}}}"#);
    let entry: TxHash = from_slice(json.as_bytes()).unwrap();
    assert_eq!(entry.tx_hash, [0; 32]);
}

#[test]
fn ninety_nine_levels_of_nesting_decode() {
    assert_eq!(decode_nested(99), Ok(1));
}

#[test]
fn fixed_binary_decodes() {
    let bytes: [u8; 4] = from_bytes(r#""deadbeef""#).unwrap();
    assert_eq!(bytes, [0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn integer_in_range_decodes() {
    assert_eq!(from_bytes::<u8>("42"), Ok(42));
    assert_eq!(from_bytes::<i8>("-128"), Ok(-128));
    assert_eq!(from_bytes::<u64>("0"), Ok(0));
}

#[test]
fn enumeration_decodes_index() {
    assert_eq!(from_bytes::<Network>(r#""mainnet""#), Ok(Network::Mainnet));
    assert_eq!(Network::NAMES.iter().position(|n| *n == "mainnet"), Some(0));
    assert_eq!(from_bytes::<Network>(r#""testnet""#), Ok(Network::Testnet));
}

#[test]
fn read_array_replaces_previous_contents() {
    let mut values: Vec<String> = vec!["stale".into(); 3];
    let mut reader = Reader::new(r#"["a", "b\"c"]"#);
    read_array(&mut reader, &mut values).unwrap();
    reader.check_complete().unwrap();
    assert_eq!(values, ["a", "b\"c"]);
}

#[test]
fn arrays_of_arrays() {
    let grid: Vec<Vec<u16>> = from_bytes("[[1, 2], [], [3]]").unwrap();
    assert_eq!(grid, vec![vec![1, 2], vec![], vec![3]]);
}

#[test]
fn surrounding_whitespace_is_allowed() {
    assert_eq!(from_bytes::<bool>(" \n\ttrue\r\n "), Ok(true));
}
