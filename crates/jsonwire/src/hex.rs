//! Hexadecimal text for fixed-width binary fields.
//!
//! Encoding is always lowercase. Decoding accepts either case but is strict
//! about length: exactly two characters per destination byte.

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Value of one hex digit.
#[inline]
pub(crate) fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Why a hex string could not fill its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HexError {
    /// The text is not `2 * dest.len()` characters long.
    Length { expected: usize, actual: usize },
    /// Non hex character at this index of the text.
    Digit { index: usize },
}

/// Decodes `text` into `dest`, which must be filled exactly.
///
/// `dest` is only written once the whole input has been validated.
pub(crate) fn decode_to(dest: &mut [u8], text: &[u8]) -> Result<(), HexError> {
    if text.len() != dest.len() * 2 {
        return Err(HexError::Length {
            expected: dest.len() * 2,
            actual: text.len(),
        });
    }
    if let Some(index) = text.iter().position(|&b| nibble(b).is_none()) {
        return Err(HexError::Digit { index });
    }
    for (out, pair) in dest.iter_mut().zip(text.chunks_exact(2)) {
        let high = nibble(pair[0]).unwrap_or_default();
        let low = nibble(pair[1]).unwrap_or_default();
        *out = (high << 4) | low;
    }
    Ok(())
}

/// Appends the lowercase hex form of `bytes` to `out`.
pub(crate) fn encode_into(out: &mut bytes::BytesMut, bytes: &[u8]) {
    out.reserve(bytes.len() * 2);
    for &b in bytes {
        out.extend_from_slice(&[DIGITS[usize::from(b >> 4)], DIGITS[usize::from(b & 0x0f)]]);
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    #[test]
    fn decodes_either_case() {
        let mut dest = [0u8; 4];
        decode_to(&mut dest, b"DEADbeef").unwrap();
        assert_eq!(dest, [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn wrong_length_leaves_destination_untouched() {
        let mut dest = [7u8; 4];
        assert_eq!(
            decode_to(&mut dest, b"dead"),
            Err(HexError::Length {
                expected: 8,
                actual: 4
            })
        );
        assert_eq!(dest, [7; 4]);
    }

    #[test]
    fn rejects_non_hex_digits() {
        let mut dest = [0u8; 2];
        assert_eq!(
            decode_to(&mut dest, b"0g00"),
            Err(HexError::Digit { index: 1 })
        );
    }

    #[test]
    fn encodes_lowercase() {
        let mut out = BytesMut::new();
        encode_into(&mut out, &[0x00, 0x0F, 0xA0, 0xFF]);
        assert_eq!(&out[..], b"000fa0ff");
    }
}
