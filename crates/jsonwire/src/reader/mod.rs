//! DOM-less JSON decoding.
//!
//! A [`Reader`] walks one complete, immutable input buffer token by token.
//! Callers pull exactly the token kind their record expects next; anything
//! else fails immediately with a categorized [`Error`] and the whole decode is
//! abandoned.
//!
//! # Examples
//!
//! ```rust
//! use jsonwire::Reader;
//!
//! let mut reader = Reader::new(r#"[true, 7, "seven"]"#);
//! reader.start_array()?;
//! assert!(!reader.is_array_end(0)?);
//! assert!(reader.boolean()?);
//! assert!(!reader.is_array_end(1)?);
//! assert_eq!(reader.unsigned_integer()?, 7);
//! assert!(!reader.is_array_end(2)?);
//! assert_eq!(reader.string()?, "seven");
//! assert!(reader.is_array_end(3)?);
//! reader.end_array();
//! reader.check_complete()?;
//! # Ok::<(), jsonwire::Error>(())
//! ```

mod cursor;
mod impls;
mod scanner;

use alloc::{format, string::String};

use bytes::Bytes;

pub(crate) use self::cursor::Cursor;
use self::scanner::{NumberLexeme, integer_value};
use crate::{
    error::{Error, ErrorSource, Schema, SyntaxError},
    hex::{self, HexError},
    options::ReaderOptions,
};

/// Per-type decode capability.
///
/// Implemented once per record type, usually by listing its fields with
/// [`read_object`](crate::read_object):
///
/// ```rust
/// use jsonwire::{Error, ReadJson, Reader, read_field, read_object};
///
/// #[derive(Default)]
/// struct Entry {
///     tx_hash: [u8; 32],
/// }
///
/// impl ReadJson for Entry {
///     fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
///         read_object(source, [read_field!(self.tx_hash)])
///     }
/// }
/// ```
pub trait ReadJson {
    /// Overwrites `self` with the next value in `source`.
    ///
    /// # Errors
    ///
    /// Returns the first schema or syntax violation found. `self` may have
    /// been partially overwritten; callers must discard it.
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error>;
}

/// Integer types the reader can range-check into.
///
/// Every JSON integer is first read exactly (as an `i128`) and then checked
/// against `MIN..=MAX` of the target.
pub trait WireInteger: Copy {
    /// Whether negative values are representable.
    const SIGNED: bool;
    /// Smallest representable value.
    const MIN: i128;
    /// Largest representable value.
    const MAX: i128;

    /// Narrows a value already known to be within `MIN..=MAX`.
    fn from_wire(value: i128) -> Self;
}

macro_rules! wire_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl WireInteger for $ty {
            const SIGNED: bool = <$ty>::MIN != 0;
            const MIN: i128 = <$ty>::MIN as i128;
            const MAX: i128 = <$ty>::MAX as i128;

            #[inline]
            fn from_wire(value: i128) -> Self {
                <$ty>::try_from(value).unwrap_or_default()
            }
        }
    )*};
}

wire_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[inline]
fn is_value_start(byte: u8) -> bool {
    matches!(
        byte,
        b'"' | b'[' | b'{' | b't' | b'f' | b'n' | b'-' | b'0'..=b'9'
    )
}

#[inline]
fn is_number_start(byte: u8) -> bool {
    byte == b'-' || byte.is_ascii_digit()
}

/// Reads JSON tokens one at a time for DOM-less decoding.
#[derive(Debug)]
pub struct Reader {
    cursor: Cursor,
    /// Holds the last string token that contained escapes.
    scratch: String,
    options: ReaderOptions,
}

impl Reader {
    /// Creates a reader over one complete JSON document with default options.
    pub fn new(source: impl Into<Bytes>) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Creates a reader over one complete JSON document.
    pub fn with_options(source: impl Into<Bytes>, options: ReaderOptions) -> Self {
        Self {
            cursor: Cursor::new(source.into(), options.max_depth),
            scratch: String::new(),
            options,
        }
    }

    /// Number of currently open objects and arrays.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.cursor.depth()
    }

    /// Bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Builds an error located at the current offset, for use by
    /// [`ReadJson`] implementations that validate beyond the token level.
    #[must_use]
    pub fn error(&self, source: impl Into<ErrorSource>) -> Error {
        self.cursor.error(source)
    }

    /// Verifies that the top-level value was read completely.
    ///
    /// # Errors
    ///
    /// Fails when objects or arrays are still open (truncated input) or, unless
    /// [`ReaderOptions::allow_trailing_bytes`] is set, when anything but
    /// whitespace follows the value.
    pub fn check_complete(&mut self) -> Result<(), Error> {
        let depth = self.cursor.depth();
        if depth != 0 {
            return Err(self.cursor.error(SyntaxError::UnexpectedEnd(depth)));
        }
        if !self.options.allow_trailing_bytes && self.cursor.next_token().is_some() {
            return Err(self.cursor.error(SyntaxError::TrailingCharacters));
        }
        Ok(())
    }

    /// Peeks the next token. A token of the wrong kind is `expected`; a byte
    /// that cannot start any value is a syntax error.
    fn expect_token(&mut self, accept: impl Fn(u8) -> bool, expected: Schema) -> Result<u8, Error> {
        match self.cursor.next_token() {
            Some(byte) if accept(byte) => Ok(byte),
            Some(byte) if is_value_start(byte) => Err(self.cursor.error(expected)),
            Some(byte) => Err(self.cursor.error(SyntaxError::unexpected(byte))),
            None => Err(self.cursor.error(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    /// # Errors
    ///
    /// [`Schema::Boolean`] unless the next token is `true` or `false`.
    pub fn boolean(&mut self) -> Result<bool, Error> {
        match self.expect_token(|b| b == b't' || b == b'f', Schema::Boolean)? {
            b't' => self.cursor.scan_literal("true").map(|()| true),
            _ => self.cursor.scan_literal("false").map(|()| false),
        }
    }

    /// # Errors
    ///
    /// [`Schema::Integer`] if the next token is not an integer;
    /// [`Schema::LargerInteger`] or [`Schema::SmallerInteger`] when it does
    /// not fit an `i64`.
    pub fn integer(&mut self) -> Result<i64, Error> {
        self.integer_as()
    }

    /// # Errors
    ///
    /// [`Schema::UnsignedInteger`] if the next token is not an integer;
    /// [`Schema::LargerInteger`] for negative values and
    /// [`Schema::SmallerInteger`] above `u64::MAX`.
    pub fn unsigned_integer(&mut self) -> Result<u64, Error> {
        self.integer_as()
    }

    /// Reads an integer and range-checks it into `T`.
    ///
    /// # Errors
    ///
    /// See [`Reader::integer`] and [`Reader::unsigned_integer`].
    pub fn integer_as<T: WireInteger>(&mut self) -> Result<T, Error> {
        let expected = if T::SIGNED {
            Schema::Integer
        } else {
            Schema::UnsignedInteger
        };
        self.expect_token(is_number_start, expected)?;
        let start = self.cursor.offset();
        let NumberLexeme::Integer(span) = self.cursor.scan_number()? else {
            return Err(Error::new(expected, start));
        };

        let text = self.cursor.lexeme(span);
        let negative = text.starts_with('-');
        let value = integer_value(text);
        if value.map_or(negative, |v| v < T::MIN) {
            return Err(Error::new(Schema::LargerInteger, start)
                .with_context(format!("{text} given when {} is minimum permitted", T::MIN)));
        }
        if value.map_or(!negative, |v| v > T::MAX) {
            return Err(Error::new(Schema::SmallerInteger, start)
                .with_context(format!("{text} given when {} is maximum permitted", T::MAX)));
        }
        Ok(T::from_wire(value.unwrap_or_default()))
    }

    /// # Errors
    ///
    /// [`Schema::Number`] if the next token is not numeric.
    pub fn real(&mut self) -> Result<f64, Error> {
        self.expect_token(is_number_start, Schema::Number)?;
        let start = self.cursor.offset();
        let span = self.cursor.scan_number()?.span();
        let value: f64 = self
            .cursor
            .lexeme(span)
            .parse()
            .map_err(|_| Error::new(SyntaxError::InvalidNumber, start))?;
        if !value.is_finite() {
            return Err(Error::new(SyntaxError::NumberTooBig, start));
        }
        Ok(value)
    }

    /// Reads a string without copying it when it holds no escape sequences.
    ///
    /// # Errors
    ///
    /// [`Schema::String`] if the next token is not a string.
    pub fn string_ref(&mut self) -> Result<&str, Error> {
        self.expect_token(|b| b == b'"', Schema::String)?;
        self.cursor.scan_string(&mut self.scratch)
    }

    /// # Errors
    ///
    /// [`Schema::String`] if the next token is not a string.
    pub fn string(&mut self) -> Result<String, Error> {
        self.string_ref().map(String::from)
    }

    /// Reads a hex string into exactly `dest.len()` bytes.
    ///
    /// # Errors
    ///
    /// [`Schema::FixedBinary`] unless the next token is a string of exactly
    /// `2 * dest.len()` hex characters.
    pub fn binary(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.expect_token(|b| b == b'"', Schema::FixedBinary)?;
        let start = self.cursor.offset();
        let text = self.cursor.scan_string(&mut self.scratch)?;
        hex::decode_to(dest, text.as_bytes()).map_err(|e| {
            let context = match e {
                HexError::Length { expected, actual } => {
                    format!("expected {expected} hex characters but got {actual}")
                }
                HexError::Digit { index } => format!("invalid hex character at index {index}"),
            };
            Error::new(Schema::FixedBinary, start).with_context(context)
        })
    }

    /// Reads a string and returns its index within `names`.
    ///
    /// # Errors
    ///
    /// [`Schema::Enumeration`] unless the next token is a string exactly
    /// equal to one of `names`.
    pub fn enumeration(&mut self, names: &[&str]) -> Result<usize, Error> {
        self.expect_token(|b| b == b'"', Schema::Enumeration)?;
        let start = self.cursor.offset();
        let value = self.cursor.scan_string(&mut self.scratch)?;
        if let Some(index) = names.iter().position(|name| *name == value) {
            return Ok(index);
        }
        Err(Error::new(Schema::Enumeration, start)
            .with_context(format!("{value:?} is not a valid enum")))
    }

    /// # Errors
    ///
    /// [`Schema::Array`] if the next token is not `[`;
    /// [`Schema::MaximumDepth`] when the nesting limit is reached.
    pub fn start_array(&mut self) -> Result<(), Error> {
        self.expect_token(|b| b == b'[', Schema::Array)?;
        self.cursor.advance(1);
        self.cursor.increment_depth()
    }

    /// Returns `true` (consuming it) when the next token is `]`. After the
    /// first element (`count > 0`) consumes the separating comma.
    ///
    /// # Errors
    ///
    /// Syntax error on end of input or a missing separator.
    pub fn is_array_end(&mut self, count: usize) -> Result<bool, Error> {
        match self.cursor.next_token() {
            Some(b']') => {
                self.cursor.advance(1);
                Ok(true)
            }
            Some(b',') if count != 0 => {
                self.cursor.advance(1);
                Ok(false)
            }
            Some(_) if count == 0 => Ok(false),
            _ => Err(self
                .cursor
                .error(SyntaxError::ArrayMissCommaOrSquareBracket)),
        }
    }

    /// Closes the array whose `]` was consumed by [`Reader::is_array_end`].
    pub fn end_array(&mut self) {
        self.cursor.decrement_depth();
    }

    /// # Errors
    ///
    /// [`Schema::Object`] if the next token is not `{`;
    /// [`Schema::MaximumDepth`] when the nesting limit is reached.
    pub fn start_object(&mut self) -> Result<(), Error> {
        self.expect_token(|b| b == b'{', Schema::Object)?;
        self.cursor.advance(1);
        self.cursor.increment_depth()
    }

    /// Reads the next member name of the current object and resolves it
    /// against `map`.
    ///
    /// Returns `None` once the closing `}` has been consumed. Members whose
    /// name is not in `map` are skipped together with their values. On
    /// `Some(index)` the reader is positioned at that member's value. `count`
    /// is the number of members already returned for this object.
    ///
    /// # Errors
    ///
    /// Syntax errors for malformed members and any error raised while
    /// skipping unknown values.
    pub fn key(&mut self, map: &[&str], mut count: usize) -> Result<Option<usize>, Error> {
        loop {
            match self.cursor.next_token() {
                Some(b'}') => {
                    self.cursor.advance(1);
                    return Ok(None);
                }
                Some(b',') if count != 0 => self.cursor.advance(1),
                Some(_) if count == 0 => {}
                _ => {
                    return Err(self
                        .cursor
                        .error(SyntaxError::ObjectMissCommaOrCurlyBracket));
                }
            }
            count += 1;

            if self.cursor.next_token() != Some(b'"') {
                return Err(self.cursor.error(SyntaxError::ObjectMissName));
            }
            let name = self.cursor.scan_string(&mut self.scratch)?;
            let index = map.iter().position(|field| *field == name);

            if !self.cursor.eat(b':') {
                return Err(self.cursor.error(SyntaxError::ObjectMissColon));
            }
            if index.is_some() {
                return Ok(index);
            }
            self.skip_value()?;
        }
    }

    /// Closes the object whose `}` was consumed by [`Reader::key`].
    pub fn end_object(&mut self) {
        self.cursor.decrement_depth();
    }

    /// Validates and discards the next value, however deeply nested.
    ///
    /// # Errors
    ///
    /// Any syntax error in the value, or [`Schema::MaximumDepth`].
    pub fn skip_value(&mut self) -> Result<(), Error> {
        match self.cursor.next_token() {
            Some(b'[') => {
                self.start_array()?;
                let mut count = 0;
                while !self.is_array_end(count)? {
                    self.skip_value()?;
                    count += 1;
                }
                self.end_array();
            }
            Some(b'{') => {
                self.start_object()?;
                // No member resolves against an empty map, so this consumes
                // the whole object.
                self.key(&[], 0)?;
                self.end_object();
            }
            Some(b'"') => {
                self.cursor.scan_string(&mut self.scratch)?;
            }
            Some(b't') => self.cursor.scan_literal("true")?,
            Some(b'f') => self.cursor.scan_literal("false")?,
            Some(b'n') => self.cursor.scan_literal("null")?,
            Some(byte) if is_number_start(byte) => {
                self.cursor.scan_number()?;
            }
            Some(byte) => {
                return Err(self.cursor.error(SyntaxError::unexpected(byte)));
            }
            None => return Err(self.cursor.error(SyntaxError::UnexpectedEndOfInput)),
        }
        Ok(())
    }
}
