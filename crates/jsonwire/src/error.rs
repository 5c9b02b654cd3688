use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// Schema violations: the token was valid JSON but not what the record
/// declared at that position.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schema {
    /// Expected an array value.
    #[error("expected an array value")]
    Array,
    /// Expected a boolean value.
    #[error("expected a boolean value")]
    Boolean,
    /// Expected a value from a specific set.
    #[error("expected a value from a specific set")]
    Enumeration,
    /// Expected a binary value of fixed length.
    #[error("expected a binary value of fixed length")]
    FixedBinary,
    /// Expected an integer value.
    #[error("expected an integer value")]
    Integer,
    /// Key for object is invalid (duplicated).
    #[error("key for object is invalid")]
    InvalidKey,
    /// The integer is below the minimum of the target type.
    #[error("expected a larger integer value")]
    LargerInteger,
    /// Too many nested objects and arrays.
    #[error("maximum depth of nested objects and arrays reached")]
    MaximumDepth,
    /// A required key was not present in the object.
    #[error("missing required key for object")]
    MissingKey,
    /// Expected a number (integer or float) value.
    #[error("expected a number value")]
    Number,
    /// Expected an object value.
    #[error("expected an object value")]
    Object,
    /// The integer is above the maximum of the target type.
    #[error("expected a smaller integer value")]
    SmallerInteger,
    /// Expected a string value.
    #[error("expected a string value")]
    String,
    /// Expected an unsigned integer value.
    #[error("expected an unsigned integer value")]
    UnsignedInteger,
}

/// Lexical errors: the input is not well-formed JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Input ended where a value was expected.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A byte that cannot start or continue a token.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A non-ASCII byte outside of a string.
    #[error("invalid byte 0x{0:02x}")]
    InvalidByte(u8),
    /// A misspelled `true`, `false` or `null`.
    #[error("invalid literal, expected `{0}`")]
    InvalidLiteral(&'static str),
    /// A malformed number.
    #[error("invalid number")]
    InvalidNumber,
    /// A number that overflows `f64`.
    #[error("number too big to be stored in a double")]
    NumberTooBig,
    /// A string with no closing quote.
    #[error("missing closing quotation mark in string")]
    UnterminatedString,
    /// A raw control character inside a string.
    #[error("unescaped control character 0x{0:02x} in string")]
    ControlCharacter(u8),
    /// A backslash followed by an unknown escape.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// A non-hex digit in a `\u` escape.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A lone or mismatched surrogate.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidUnicodeEscape(u32),
    /// String contents that are not UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// An array element followed by neither `,` nor `]`.
    #[error("missing a comma or ']' after an array element")]
    ArrayMissCommaOrSquareBracket,
    /// An object member followed by neither `,` nor `}`.
    #[error("missing a comma or '}}' after an object member")]
    ObjectMissCommaOrCurlyBracket,
    /// An object member that does not start with a string.
    #[error("missing a name for object member")]
    ObjectMissName,
    /// A member name not followed by `:`.
    #[error("missing a colon after a name of object member")]
    ObjectMissColon,
    /// Input ended inside this many open objects or arrays.
    #[error("unexpected end of document with {0} open object(s) or array(s)")]
    UnexpectedEnd(usize),
    /// Bytes other than whitespace after the root value.
    #[error("trailing characters after the document")]
    TrailingCharacters,
}

impl SyntaxError {
    /// ASCII is shown as a character, anything else as the raw byte.
    pub(crate) fn unexpected(byte: u8) -> Self {
        if byte.is_ascii() {
            Self::InvalidCharacter(char::from(byte))
        } else {
            Self::InvalidByte(byte)
        }
    }
}

/// Misuse of [`Writer`](crate::Writer). These are logic errors in the caller,
/// never a property of external data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// [`Writer::take`](crate::Writer::take) before the root value was finished.
    #[error("incomplete JSON document with {open} open object(s) or array(s)")]
    Incomplete {
        /// Objects and arrays still open.
        open: usize,
    },
    /// [`Writer::key`](crate::Writer::key) outside of an object.
    #[error("object key written outside of an object")]
    UnexpectedKey,
    /// A value inside an object with no key before it.
    #[error("object value written without a key")]
    ExpectedKey,
    /// Two keys in a row.
    #[error("object key written before the previous key's value")]
    ExpectedValue,
    /// An end token that does not match the innermost open scope.
    #[error("closed a scope that was not open")]
    MismatchedEnd,
    /// A second value after the root value was complete.
    #[error("document already has a root value")]
    MultipleRoots,
}

/// The category carried by every [`Error`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorSource {
    /// The document did not match the record.
    #[error("schema error: {0}")]
    Schema(#[from] Schema),
    /// The input is not well-formed JSON.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    /// The writer was misused.
    #[error("write error: {0}")]
    Write(#[from] WriteError),
}

/// A failed decode or encode.
///
/// The first violation aborts the whole operation, so an `Error` always
/// describes exactly one problem: a category, optional human readable
/// context, and the byte offset where the reader (or writer) stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub(crate) source: ErrorSource,
    pub(crate) context: Option<String>,
    pub(crate) offset: usize,
}

impl Error {
    pub(crate) fn new(source: impl Into<ErrorSource>, offset: usize) -> Self {
        Self {
            source: source.into(),
            context: None,
            offset,
        }
    }

    /// Attaches descriptive context, replacing any previous context.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The category of this error.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// The schema category, if this is a schema violation.
    #[must_use]
    pub fn schema(&self) -> Option<Schema> {
        match self.source {
            ErrorSource::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    /// The tokenizer error, if the input was not well-formed JSON.
    #[must_use]
    pub fn syntax(&self) -> Option<&SyntaxError> {
        match &self.source {
            ErrorSource::Syntax(syntax) => Some(syntax),
            _ => None,
        }
    }

    /// The writer misuse, if this error came from encoding.
    #[must_use]
    pub fn write(&self) -> Option<&WriteError> {
        match &self.source {
            ErrorSource::Write(write) => Some(write),
            _ => None,
        }
    }

    /// Descriptive context such as the offending field name.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Byte offset into the input (decode) or output (encode).
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)?;
        if let Some(context) = &self.context {
            write!(f, ": {context}")?;
        }
        write!(f, " at byte {}", self.offset)
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.source)
    }
}
