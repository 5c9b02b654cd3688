//! DOM-less JSON encoding.
//!
//! A [`Writer`] appends minified tokens to a growable buffer and tracks which
//! arrays and objects are still open, so that [`Writer::take`] can refuse to
//! hand out a structurally incomplete document.

mod impls;

use alloc::{format, vec::Vec};
use core::fmt::Write as _;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    error::{Error, Schema, WriteError},
    hex,
};

/// Per-type encode capability, the mirror of [`ReadJson`](crate::ReadJson).
///
/// ```rust
/// use jsonwire::{Error, WriteJson, Writer, to_bytes, write_field, write_object};
///
/// struct Entry {
///     id: u32,
///     tag: String,
/// }
///
/// impl WriteJson for Entry {
///     fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
///         write_object(dest, [write_field!(self.id), write_field!(self.tag)])
///     }
/// }
///
/// let json = to_bytes(&Entry { id: 3, tag: "x".into() })?;
/// assert_eq!(&json[..], br#"{"id":3,"tag":"x"}"#);
/// # Ok::<(), Error>(())
/// ```
pub trait WriteJson {
    /// Appends `self` to `dest` as exactly one JSON value.
    ///
    /// # Errors
    ///
    /// Only on writer misuse, or a value the wire format cannot represent
    /// (non-finite floats, out of range enumeration indices).
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Array { count: usize },
    Object { count: usize, awaiting_value: bool },
}

/// Writes JSON tokens one at a time for DOM-less output.
#[derive(Debug, Default)]
pub struct Writer {
    bytes: BytesMut,
    scopes: Vec<Scope>,
    /// A root value has been fully written.
    complete: bool,
}

impl Writer {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open objects and arrays.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// A value too wide for the 64-bit wire integers.
    fn out_of_range(&self, schema: Schema) -> Error {
        Error::new(schema, self.bytes.len())
    }

    fn misuse(&self, error: WriteError) -> Error {
        Error::new(error, self.bytes.len())
    }

    fn before_value(&mut self) -> Result<(), Error> {
        let offset = self.bytes.len();
        match self.scopes.last_mut() {
            None if self.complete => Err(Error::new(WriteError::MultipleRoots, offset)),
            None => Ok(()),
            Some(Scope::Array { count }) => {
                if *count != 0 {
                    self.bytes.put_u8(b',');
                }
                *count += 1;
                Ok(())
            }
            Some(Scope::Object { awaiting_value, .. }) => {
                if !*awaiting_value {
                    return Err(Error::new(WriteError::ExpectedKey, offset));
                }
                *awaiting_value = false;
                Ok(())
            }
        }
    }

    fn after_value(&mut self) {
        if self.scopes.is_empty() {
            self.complete = true;
        }
    }

    fn formatted(&mut self, args: core::fmt::Arguments<'_>) -> Result<(), Error> {
        self.before_value()?;
        // Formatting into `BytesMut` grows the buffer and never fails.
        let _ = self.bytes.write_fmt(args);
        self.after_value();
        Ok(())
    }

    /// # Errors
    ///
    /// Writer misuse only.
    pub fn boolean(&mut self, value: bool) -> Result<(), Error> {
        self.before_value()?;
        self.bytes
            .extend_from_slice(if value { b"true" } else { b"false" });
        self.after_value();
        Ok(())
    }

    /// # Errors
    ///
    /// Writer misuse only.
    pub fn integer(&mut self, value: i64) -> Result<(), Error> {
        self.formatted(format_args!("{value}"))
    }

    /// # Errors
    ///
    /// Writer misuse only.
    pub fn unsigned_integer(&mut self, value: u64) -> Result<(), Error> {
        self.formatted(format_args!("{value}"))
    }

    /// # Errors
    ///
    /// [`Schema::Number`] for NaN and infinities, which JSON cannot express.
    pub fn real(&mut self, value: f64) -> Result<(), Error> {
        if !value.is_finite() {
            return Err(Error::new(Schema::Number, self.bytes.len())
                .with_context(format!("{value} is not representable")));
        }
        // `Debug` is the shortest round-trip form and switches to an exponent
        // for large and small magnitudes; `Display` never does.
        self.formatted(format_args!("{value:?}"))
    }

    /// # Errors
    ///
    /// Writer misuse only.
    pub fn string(&mut self, value: &str) -> Result<(), Error> {
        self.before_value()?;
        escape_into(&mut self.bytes, value);
        self.after_value();
        Ok(())
    }

    /// Writes `value` as a lowercase hex string of `2 * value.len()`
    /// characters.
    ///
    /// # Errors
    ///
    /// Writer misuse only.
    pub fn binary(&mut self, value: &[u8]) -> Result<(), Error> {
        self.before_value()?;
        self.bytes.put_u8(b'"');
        hex::encode_into(&mut self.bytes, value);
        self.bytes.put_u8(b'"');
        self.after_value();
        Ok(())
    }

    /// Writes `names[index]` as a string.
    ///
    /// # Errors
    ///
    /// [`Schema::Enumeration`] if `index` is out of range.
    pub fn enumeration(&mut self, index: usize, names: &[&str]) -> Result<(), Error> {
        let Some(name) = names.get(index) else {
            return Err(Error::new(Schema::Enumeration, self.bytes.len()).with_context(
                format!("index {index} is outside of {} names", names.len()),
            ));
        };
        self.string(name)
    }

    /// # Errors
    ///
    /// Writer misuse only.
    pub fn start_array(&mut self) -> Result<(), Error> {
        self.before_value()?;
        self.bytes.put_u8(b'[');
        self.scopes.push(Scope::Array { count: 0 });
        Ok(())
    }

    /// # Errors
    ///
    /// [`WriteError::MismatchedEnd`] unless an array is the innermost open
    /// scope.
    pub fn end_array(&mut self) -> Result<(), Error> {
        if !matches!(self.scopes.last(), Some(Scope::Array { .. })) {
            return Err(self.misuse(WriteError::MismatchedEnd));
        }
        self.scopes.pop();
        self.bytes.put_u8(b']');
        self.after_value();
        Ok(())
    }

    /// # Errors
    ///
    /// Writer misuse only.
    pub fn start_object(&mut self) -> Result<(), Error> {
        self.before_value()?;
        self.bytes.put_u8(b'{');
        self.scopes.push(Scope::Object {
            count: 0,
            awaiting_value: false,
        });
        Ok(())
    }

    /// Writes a member name; the next value written belongs to it.
    ///
    /// # Errors
    ///
    /// [`WriteError::UnexpectedKey`] outside of an object, and
    /// [`WriteError::ExpectedValue`] when the previous key has no value yet.
    pub fn key(&mut self, name: &str) -> Result<(), Error> {
        let offset = self.bytes.len();
        let Some(Scope::Object {
            count,
            awaiting_value,
        }) = self.scopes.last_mut()
        else {
            return Err(Error::new(WriteError::UnexpectedKey, offset));
        };
        if *awaiting_value {
            return Err(Error::new(WriteError::ExpectedValue, offset));
        }
        if *count != 0 {
            self.bytes.put_u8(b',');
        }
        *count += 1;
        *awaiting_value = true;
        escape_into(&mut self.bytes, name);
        self.bytes.put_u8(b':');
        Ok(())
    }

    /// # Errors
    ///
    /// [`WriteError::MismatchedEnd`] unless an object is the innermost open
    /// scope and its last key has a value.
    pub fn end_object(&mut self) -> Result<(), Error> {
        if !matches!(
            self.scopes.last(),
            Some(Scope::Object {
                awaiting_value: false,
                ..
            })
        ) {
            return Err(self.misuse(WriteError::MismatchedEnd));
        }
        self.scopes.pop();
        self.bytes.put_u8(b'}');
        self.after_value();
        Ok(())
    }

    /// Returns the finished document and resets the writer for reuse.
    ///
    /// # Errors
    ///
    /// [`WriteError::Incomplete`] if no value was written or arrays/objects
    /// are still open. This is a bug in the caller.
    pub fn take(&mut self) -> Result<Bytes, Error> {
        if !self.complete || !self.scopes.is_empty() {
            return Err(self.misuse(WriteError::Incomplete {
                open: self.scopes.len(),
            }));
        }
        self.complete = false;
        Ok(self.bytes.split().freeze())
    }
}

fn escape_into(out: &mut BytesMut, value: &str) {
    let bytes = value.as_bytes();
    out.reserve(bytes.len() + 2);
    out.put_u8(b'"');
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        let escape: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x08 => b"\\b",
            0x0c => b"\\f",
            0x00..=0x1f => b"\\u00",
            _ => continue,
        };
        out.extend_from_slice(&bytes[start..i]);
        out.extend_from_slice(escape);
        if escape == b"\\u00" {
            hex::encode_into(out, &[b]);
        }
        start = i + 1;
    }
    out.extend_from_slice(&bytes[start..]);
    out.put_u8(b'"');
}
