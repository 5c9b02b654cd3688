//! Lexing of single tokens straight out of the cursor's buffer.
//!
//! Strings are returned borrowed from the input whenever the token holds no
//! escape sequence. The first backslash switches the token to owned
//! accumulation in the reader's scratch `String`, which is reused across
//! tokens so that escaped keys do not allocate after warm-up.
//!
//! The scanner only lexes. Whether a token is acceptable at a position is the
//! reader's decision.

use alloc::string::String;
use core::ops::Range;

use bstr::ByteSlice;

use super::cursor::Cursor;
use crate::{
    error::{Error, SyntaxError},
    hex,
};

/// Lexical hint so callers can distinguish integers from floats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NumberLexeme {
    /// No `.` and no exponent.
    Integer(Range<usize>),
    /// Has `.` or an exponent.
    Float(Range<usize>),
}

impl NumberLexeme {
    pub(crate) fn span(&self) -> Range<usize> {
        match self {
            Self::Integer(span) | Self::Float(span) => span.clone(),
        }
    }
}

impl Cursor {
    /// Lexes the string token starting at the current `"`.
    pub(crate) fn scan_string<'s>(&'s mut self, scratch: &'s mut String) -> Result<&'s str, Error> {
        let bytes: &'s [u8] = &self.source[..];
        debug_assert_eq!(bytes.get(self.pos), Some(&b'"'));

        let mut pos = self.pos + 1;
        let mut owned = false;
        loop {
            let Some(found) = bytes[pos..].find_byteset(b"\"\\") else {
                self.pos = bytes.len();
                return Err(Error::new(SyntaxError::UnterminatedString, bytes.len()));
            };
            let end = pos + found;
            let segment = &bytes[pos..end];
            if let Some(at) = segment.iter().position(|&b| b < 0x20) {
                self.pos = pos + at;
                return Err(Error::new(
                    SyntaxError::ControlCharacter(segment[at]),
                    pos + at,
                ));
            }
            let text = core::str::from_utf8(segment)
                .map_err(|e| Error::new(SyntaxError::InvalidUtf8, pos + e.valid_up_to()))?;

            if bytes[end] == b'"' {
                self.pos = end + 1;
                if !owned {
                    return Ok(text);
                }
                scratch.push_str(text);
                return Ok(scratch.as_str());
            }

            if !owned {
                scratch.clear();
                owned = true;
            }
            scratch.push_str(text);
            pos = unescape(bytes, end, scratch)?;
        }
    }

    /// Lexes the number token at the current position and validates it
    /// against the JSON grammar.
    pub(crate) fn scan_number(&mut self) -> Result<NumberLexeme, Error> {
        let bytes = self.bytes();
        let start = self.pos;
        let digits_from = |mut at: usize| {
            while bytes.get(at).is_some_and(u8::is_ascii_digit) {
                at += 1;
            }
            at
        };

        let mut at = start;
        if bytes.get(at) == Some(&b'-') {
            at += 1;
        }
        match bytes.get(at) {
            Some(b'0') => at += 1,
            Some(b'1'..=b'9') => at = digits_from(at + 1),
            _ => return Err(Error::new(SyntaxError::InvalidNumber, at)),
        }

        let mut float = false;
        if bytes.get(at) == Some(&b'.') {
            let end = digits_from(at + 1);
            if end == at + 1 {
                return Err(Error::new(SyntaxError::InvalidNumber, end));
            }
            at = end;
            float = true;
        }
        if matches!(bytes.get(at), Some(b'e' | b'E')) {
            at += 1;
            if matches!(bytes.get(at), Some(b'+' | b'-')) {
                at += 1;
            }
            let end = digits_from(at);
            if end == at {
                return Err(Error::new(SyntaxError::InvalidNumber, end));
            }
            at = end;
            float = true;
        }

        self.pos = at;
        Ok(if float {
            NumberLexeme::Float(start..at)
        } else {
            NumberLexeme::Integer(start..at)
        })
    }

    /// Text of a lexeme previously returned by [`Cursor::scan_number`].
    pub(crate) fn lexeme(&self, span: Range<usize>) -> &str {
        // Number lexemes are ASCII by construction.
        self.bytes()[span].to_str().unwrap_or_default()
    }

    /// Consumes `literal` (`true`, `false` or `null`) exactly.
    pub(crate) fn scan_literal(&mut self, literal: &'static str) -> Result<(), Error> {
        if self.remaining().starts_with(literal.as_bytes()) {
            self.advance(literal.len());
            Ok(())
        } else {
            Err(self.error(SyntaxError::InvalidLiteral(literal)))
        }
    }
}

/// Exact value of an integer lexeme, or `None` when it does not fit `i128`.
pub(crate) fn integer_value(text: &str) -> Option<i128> {
    let (negative, digits) = match text.as_bytes().split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, text.as_bytes()),
    };
    let magnitude = digits.iter().try_fold(0i128, |acc, &digit| {
        acc.checked_mul(10)?.checked_add(i128::from(digit - b'0'))
    })?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Decodes the escape sequence at `bytes[at] == b'\\'` into `scratch`.
/// Returns the index just past the sequence.
fn unescape(bytes: &[u8], at: usize, scratch: &mut String) -> Result<usize, Error> {
    let Some(&kind) = bytes.get(at + 1) else {
        return Err(Error::new(SyntaxError::UnterminatedString, bytes.len()));
    };
    let ch = match kind {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{8}',
        b'f' => '\u{c}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        b'u' => return unescape_unicode(bytes, at, scratch),
        other if other.is_ascii() => {
            return Err(Error::new(
                SyntaxError::InvalidEscape(char::from(other)),
                at + 1,
            ));
        }
        other => return Err(Error::new(SyntaxError::InvalidByte(other), at + 1)),
    };
    scratch.push(ch);
    Ok(at + 2)
}

fn unescape_unicode(bytes: &[u8], at: usize, scratch: &mut String) -> Result<usize, Error> {
    let high = hex4(bytes, at + 2)?;
    let mut next = at + 6;
    let code = match high {
        0xD800..=0xDBFF => {
            if bytes.get(next..next + 2) != Some(&b"\\u"[..]) {
                return Err(Error::new(SyntaxError::InvalidUnicodeEscape(high), at));
            }
            let low = hex4(bytes, next + 2)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(Error::new(SyntaxError::InvalidUnicodeEscape(low), next));
            }
            next += 6;
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        }
        0xDC00..=0xDFFF => {
            return Err(Error::new(SyntaxError::InvalidUnicodeEscape(high), at));
        }
        code => code,
    };
    let ch = char::from_u32(code)
        .ok_or_else(|| Error::new(SyntaxError::InvalidUnicodeEscape(code), at))?;
    scratch.push(ch);
    Ok(next)
}

fn hex4(bytes: &[u8], at: usize) -> Result<u32, Error> {
    let Some(digits) = bytes.get(at..at + 4) else {
        return Err(Error::new(SyntaxError::UnterminatedString, bytes.len()));
    };
    let mut value = 0u32;
    for (i, &b) in digits.iter().enumerate() {
        let Some(nibble) = hex::nibble(b) else {
            let error = if b.is_ascii() {
                SyntaxError::InvalidUnicodeEscapeChar(char::from(b))
            } else {
                SyntaxError::InvalidByte(b)
            };
            return Err(Error::new(error, at + i));
        };
        value = (value << 4) | u32::from(nibble);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use bytes::Bytes;
    use rstest::rstest;

    use super::*;

    fn cursor(input: &'static str) -> Cursor {
        Cursor::new(Bytes::from_static(input.as_bytes()), 100)
    }

    #[test]
    fn plain_string_is_borrowed_from_input() {
        let mut c = cursor(r#""hello" tail"#);
        let mut scratch = String::from("untouched");
        let s = c.scan_string(&mut scratch).unwrap();
        assert_eq!(s, "hello");
        assert_eq!(scratch, "untouched");
        assert_eq!(c.offset(), 7);
    }

    #[rstest]
    #[case(r#""a\"b""#, "a\"b")]
    #[case(r#""\\\/\b\f\n\r\t""#, "\\/\u{8}\u{c}\n\r\t")]
    #[case(r#""\u0041\u00e9""#, "Aé")]
    #[case(r#""\ud83d\ude00!""#, "\u{1F600}!")]
    #[case(r#""caf\u00e9 au lait""#, "café au lait")]
    fn escaped_strings_use_scratch(#[case] input: &'static str, #[case] expected: &str) {
        let mut c = cursor(input);
        let mut scratch = String::new();
        assert_eq!(c.scan_string(&mut scratch).unwrap(), expected);
        assert_eq!(scratch, expected);
        assert_eq!(c.offset(), input.len());
    }

    #[rstest]
    #[case("\"abc", SyntaxError::UnterminatedString)]
    #[case("\"a\\", SyntaxError::UnterminatedString)]
    #[case("\"a\nb\"", SyntaxError::ControlCharacter(b'\n'))]
    #[case(r#""\x""#, SyntaxError::InvalidEscape('x'))]
    #[case(r#""\u12g4""#, SyntaxError::InvalidUnicodeEscapeChar('g'))]
    #[case("\"\\é\"", SyntaxError::InvalidByte(0xc3))]
    #[case("\"\\u12é4\"", SyntaxError::InvalidByte(0xc3))]
    #[case(r#""\udc00""#, SyntaxError::InvalidUnicodeEscape(0xDC00))]
    #[case(r#""\ud800x""#, SyntaxError::InvalidUnicodeEscape(0xD800))]
    #[case(r#""\ud800\u0041""#, SyntaxError::InvalidUnicodeEscape(0x0041))]
    fn malformed_strings(#[case] input: &'static str, #[case] expected: SyntaxError) {
        let mut c = cursor(input);
        let mut scratch = String::new();
        let err = c.scan_string(&mut scratch).unwrap_err();
        assert_eq!(err.syntax(), Some(&expected));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let mut c = Cursor::new(Bytes::from_static(b"\"ab\xff\""), 100);
        let mut scratch = String::new();
        let err = c.scan_string(&mut scratch).unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::InvalidUtf8));
        assert_eq!(err.offset(), 3);
    }

    #[rstest]
    #[case("0", true)]
    #[case("-0", true)]
    #[case("1234567890", true)]
    #[case("-42,", true)]
    #[case("3.25", false)]
    #[case("1e10", false)]
    #[case("-2.5E-3]", false)]
    fn valid_numbers(#[case] input: &'static str, #[case] integer: bool) {
        let mut c = cursor(input);
        let lexeme = c.scan_number().unwrap();
        let text = input.trim_end_matches([',', ']']);
        assert_eq!(c.lexeme(lexeme.span()), text);
        assert_eq!(matches!(lexeme, NumberLexeme::Integer(_)), integer);
    }

    #[rstest]
    #[case("-")]
    #[case("-a")]
    #[case("1.")]
    #[case("1.e5")]
    #[case("2e")]
    #[case("2e+")]
    #[case(".5")]
    fn invalid_numbers(#[case] input: &'static str) {
        let err = cursor(input).scan_number().unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::InvalidNumber));
    }

    #[test]
    fn integer_values() {
        assert_eq!(integer_value("0"), Some(0));
        assert_eq!(integer_value("-9223372036854775808"), Some(i128::from(i64::MIN)));
        assert_eq!(integer_value("18446744073709551616"), Some(1 << 64));
        assert_eq!(integer_value(&"9".repeat(40)), None);
    }

    #[test]
    fn literals_must_match_exactly() {
        let mut c = cursor("true");
        c.scan_literal("true").unwrap();
        assert_eq!(c.offset(), 4);

        let err = cursor("tru").scan_literal("true").unwrap_err();
        assert_eq!(err.syntax(), Some(&SyntaxError::InvalidLiteral("true")));
    }
}
