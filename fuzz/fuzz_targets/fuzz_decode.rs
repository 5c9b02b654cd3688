#![no_main]
use core::fmt::Debug;

use arbitrary::Arbitrary;
use jsonwire::{
    ReadJson, ReaderOptions, WriteJson, from_bytes, from_bytes_with_options,
    monero::{FullChain, MinimalChain, MinimalTxpool, publication::Message},
    to_bytes,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Target {
    FullChain,
    MinimalChain,
    MinimalTxpool,
    Strings,
    Integers,
    Publication,
}

#[derive(Debug, Arbitrary)]
struct Input {
    target: Target,
    max_depth: u8,
    allow_trailing_bytes: bool,
    json: Vec<u8>,
}

/// Anything the decoder accepts must re-encode to a document that decodes to
/// the same value.
fn round_trip<T>(json: &[u8], options: ReaderOptions)
where
    T: ReadJson + WriteJson + Default + PartialEq + Debug,
{
    let Ok(value) = from_bytes_with_options::<T>(json.to_vec(), options) else {
        return;
    };
    let encoded = to_bytes(&value).expect("accepted values re-encode");
    let again = from_bytes::<T>(encoded).expect("encoder output decodes");
    assert_eq!(value, again);
}

fuzz_target!(|input: Input| {
    let options = ReaderOptions {
        max_depth: usize::from(input.max_depth % 101),
        allow_trailing_bytes: input.allow_trailing_bytes,
    };
    let json = &input.json[..];
    match input.target {
        Target::FullChain => round_trip::<FullChain>(json, options),
        Target::MinimalChain => round_trip::<MinimalChain>(json, options),
        Target::MinimalTxpool => round_trip::<MinimalTxpool>(json, options),
        Target::Strings => round_trip::<Vec<String>>(json, options),
        Target::Integers => round_trip::<Vec<i64>>(json, options),
        Target::Publication => {
            let _ = Message::new(json.to_vec()).decode();
        }
    }
});
