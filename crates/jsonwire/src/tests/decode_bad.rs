use alloc::string::ToString;

use insta::assert_snapshot;
use rstest::rstest;

use super::{Network, Sample, TxHash, decode_nested};
use crate::{
    Error, ReadJson, Reader, ReaderOptions, Schema, SyntaxError, from_bytes,
    from_bytes_with_options, read_field, read_object,
};

#[derive(Debug, Default)]
struct Id {
    id: u32,
}

impl ReadJson for Id {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.id)])
    }
}

#[test]
fn missing_required_field() {
    let err = from_bytes::<TxHash>("{}").unwrap_err();
    assert_eq!(err.schema(), Some(Schema::MissingKey));
    assert_eq!(err.context(), Some("tx_hash"));
    assert_snapshot!(err.to_string(), @"schema error: missing required key for object: tx_hash at byte 2");
}

#[test]
fn first_missing_field_in_declaration_order_is_reported() {
    let err = from_bytes::<Sample>(r#"{"flag": true, "signed": 1, "name": ""}"#).unwrap_err();
    assert_eq!(err.schema(), Some(Schema::MissingKey));
    assert_eq!(err.context(), Some("small"));
}

#[test]
fn duplicate_key() {
    let err = from_bytes::<Id>(r#"{"id":1,"id":2}"#).unwrap_err();
    assert_eq!(err.schema(), Some(Schema::InvalidKey));
    assert_snapshot!(err.to_string(), @"schema error: key for object is invalid: duplicate id at byte 13");
}

#[test]
fn one_hundred_levels_of_nesting_fail() {
    let err = decode_nested(100).unwrap_err();
    assert_eq!(err.schema(), Some(Schema::MaximumDepth));
    assert_eq!(err.offset(), 100);
}

#[test]
fn depth_limit_is_configurable() {
    let options = ReaderOptions {
        max_depth: 2,
        ..ReaderOptions::default()
    };
    assert_eq!(
        from_bytes_with_options::<alloc::vec::Vec<u8>>("[1]", options),
        Ok(alloc::vec![1])
    );
    let err = from_bytes_with_options::<alloc::vec::Vec<alloc::vec::Vec<u8>>>("[[1]]", options)
        .unwrap_err();
    assert_eq!(err.schema(), Some(Schema::MaximumDepth));
}

#[test]
fn short_binary() {
    let err = from_bytes::<[u8; 4]>(r#""dead""#).unwrap_err();
    assert_eq!(err.schema(), Some(Schema::FixedBinary));
    assert_snapshot!(err.to_string(), @"schema error: expected a binary value of fixed length: expected 8 hex characters but got 4 at byte 0");
}

#[rstest]
#[case::too_big_for_u8("300", Schema::SmallerInteger)]
#[case::negative_for_unsigned("-1", Schema::LargerInteger)]
#[case::float_for_integer("4.0", Schema::UnsignedInteger)]
#[case::string_for_integer("\"4\"", Schema::UnsignedInteger)]
fn u8_out_of_domain(#[case] input: &'static str, #[case] expected: Schema) {
    assert_eq!(from_bytes::<u8>(input).unwrap_err().schema(), Some(expected));
}

#[test]
fn negative_into_every_unsigned_width() {
    assert!(from_bytes::<u16>("-1").is_err());
    assert!(from_bytes::<u32>("-1").is_err());
    assert!(from_bytes::<u64>("-1").is_err());
    assert!(from_bytes::<usize>("-1").is_err());
}

#[test]
fn unknown_enumeration_value() {
    let err = from_bytes::<Network>(r#""regtest""#).unwrap_err();
    assert_eq!(err.schema(), Some(Schema::Enumeration));
    assert_snapshot!(err.to_string(), @r#"schema error: expected a value from a specific set: "regtest" is not a valid enum at byte 0"#);
}

#[rstest]
#[case::object_for_array("{}", Schema::Array)]
#[case::array_for_object("[]", Schema::Object)]
fn wrong_container(#[case] input: &'static str, #[case] expected: Schema) {
    let err = match expected {
        Schema::Array => from_bytes::<alloc::vec::Vec<u8>>(input).unwrap_err(),
        _ => from_bytes::<Id>(input).unwrap_err(),
    };
    assert_eq!(err.schema(), Some(expected));
}

#[rstest]
#[case::trailing_value("{\"id\":1}{}", SyntaxError::TrailingCharacters)]
#[case::truncated("{\"id\":1", SyntaxError::ObjectMissCommaOrCurlyBracket)]
#[case::empty("", SyntaxError::UnexpectedEndOfInput)]
#[case::bare_word("{\"id\":x}", SyntaxError::InvalidCharacter('x'))]
#[case::single_quotes("{'id':1}", SyntaxError::ObjectMissName)]
#[case::unterminated_key("{\"id", SyntaxError::UnterminatedString)]
fn syntax_errors_pass_through(#[case] input: &'static str, #[case] expected: SyntaxError) {
    let err = from_bytes::<Id>(input).unwrap_err();
    assert_eq!(err.syntax(), Some(&expected));
    assert_eq!(err.schema(), None);
}

#[test]
fn errors_inside_nested_records_abort_everything() {
    let err = from_bytes::<Sample>(
        r#"{"flag":true,"small":1,"signed":1,"wide":1,"ratio":1,"name":"",
            "network":"mainnet","tags":[],"children":[{"id":"00000000","depth":40000}]}"#,
    )
    .unwrap_err();
    assert_eq!(err.schema(), Some(Schema::SmallerInteger));
    assert_eq!(
        err.context(),
        Some("40000 given when 32767 is maximum permitted")
    );
}
