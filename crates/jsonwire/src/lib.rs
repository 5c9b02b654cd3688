//! Schema-driven, DOM-less JSON for strongly typed records.
//!
//! Records describe themselves once per direction with [`ReadJson`] and
//! [`WriteJson`], usually by listing their fields:
//!
//! ```rust
//! use jsonwire::{
//!     Error, ReadJson, Reader, WriteJson, Writer, from_bytes, read_field, read_object, to_bytes,
//!     write_field, write_object,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Entry {
//!     height: u64,
//!     id: [u8; 4],
//! }
//!
//! impl ReadJson for Entry {
//!     fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
//!         read_object(source, [read_field!(self.height), read_field!(self.id)])
//!     }
//! }
//!
//! impl WriteJson for Entry {
//!     fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
//!         write_object(dest, [write_field!(self.height), write_field!(self.id)])
//!     }
//! }
//!
//! let entry: Entry = from_bytes(r#"{"id": "deadbeef", "height": 7, "extra": [null]}"#)?;
//! assert_eq!(entry, Entry { height: 7, id: [0xde, 0xad, 0xbe, 0xef] });
//! assert_eq!(&to_bytes(&entry)?[..], br#"{"height":7,"id":"deadbeef"}"#);
//! # Ok::<(), Error>(())
//! ```
//!
//! Decoding never builds an intermediate tree: tokens are checked against the
//! record as they are read, and the first violation abandons the whole
//! document.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod field;
mod hex;
mod options;
mod protocol;
mod reader;
mod writer;

#[cfg(feature = "monero")]
pub mod monero;
#[cfg(feature = "rpc")]
pub mod rpc;

#[cfg(test)]
mod tests;

use bytes::Bytes;

pub use error::{Error, ErrorSource, Schema, SyntaxError, WriteError};
pub use field::{ReadField, WriteField};
pub use options::{DEFAULT_MAX_DEPTH, ReaderOptions};
pub use protocol::{MAX_OBJECT_FIELDS, read_array, read_object, write_array, write_object};
pub use reader::{ReadJson, Reader, WireInteger};
pub use writer::{WriteJson, Writer};

/// Decodes one `T` from a complete JSON document.
///
/// # Errors
///
/// The first schema or syntax violation. No partial value is returned.
pub fn from_bytes<T: ReadJson + Default>(source: impl Into<Bytes>) -> Result<T, Error> {
    from_bytes_with_options(source, ReaderOptions::default())
}

/// Decodes one `T` from a complete JSON document with explicit options.
///
/// # Errors
///
/// The first schema or syntax violation. No partial value is returned.
pub fn from_bytes_with_options<T: ReadJson + Default>(
    source: impl Into<Bytes>,
    options: ReaderOptions,
) -> Result<T, Error> {
    let mut reader = Reader::with_options(source, options);
    let mut value = T::default();
    value
        .read_json(&mut reader)
        .and_then(|()| reader.check_complete())
        .inspect_err(|error| {
            tracing::debug!(offset = error.offset(), %error, "rejected json document");
        })?;
    Ok(value)
}

/// Like [`from_bytes`], copying `source` into a shared buffer first.
///
/// # Errors
///
/// See [`from_bytes`].
pub fn from_slice<T: ReadJson + Default>(source: &[u8]) -> Result<T, Error> {
    from_bytes(Bytes::copy_from_slice(source))
}

/// Encodes `value` as minified JSON.
///
/// # Errors
///
/// Only when the value's [`WriteJson`] implementation misuses the writer or
/// holds something JSON cannot represent.
pub fn to_bytes<T: WriteJson + ?Sized>(value: &T) -> Result<Bytes, Error> {
    let mut writer = Writer::new();
    value.write_json(&mut writer)?;
    let bytes = writer.take()?;
    tracing::trace!(len = bytes.len(), "encoded json document");
    Ok(bytes)
}

/// Builds a [`ReadField`] for a record member.
///
/// `read_field!(self.height)` names the field after the member;
/// `read_field!("name", self.member)` names it explicitly.
#[macro_export]
macro_rules! read_field {
    ($base:ident . $member:ident) => {
        $crate::ReadField::new(::core::stringify!($member), &mut $base.$member)
    };
    ($name:expr, $value:expr) => {
        $crate::ReadField::new($name, &mut $value)
    };
}

/// Builds a [`WriteField`] for a record member.
///
/// `write_field!(self.height)` names the field after the member;
/// `write_field!("name", self.member)` names it explicitly.
#[macro_export]
macro_rules! write_field {
    ($base:ident . $member:ident) => {
        $crate::WriteField::new(::core::stringify!($member), &$base.$member)
    };
    ($name:expr, $value:expr) => {
        $crate::WriteField::new($name, &$value)
    };
}

/// Declares a closed set of string values with [`ReadJson`] and
/// [`WriteJson`] implementations.
///
/// ```rust
/// jsonwire::wire_enum! {
///     #[derive(Default)]
///     pub enum Network {
///         #[default]
///         Mainnet = "mainnet",
///         Testnet = "testnet",
///         Stagenet = "stagenet",
///     }
/// }
///
/// assert_eq!(jsonwire::from_bytes::<Network>(r#""testnet""#)?, Network::Testnet);
/// assert_eq!(Network::Stagenet.as_str(), "stagenet");
/// # Ok::<(), jsonwire::Error>(())
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident = $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            /// Wire names, indexed by discriminant.
            pub const NAMES: &'static [&'static str] = &[$($text),+];
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name of this value.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                Self::NAMES[self as usize]
            }
        }

        impl $crate::ReadJson for $name {
            fn read_json(&mut self, source: &mut $crate::Reader) -> ::core::result::Result<(), $crate::Error> {
                let index = source.enumeration(Self::NAMES)?;
                *self = Self::VARIANTS[index];
                ::core::result::Result::Ok(())
            }
        }

        impl $crate::WriteJson for $name {
            fn write_json(&self, dest: &mut $crate::Writer) -> ::core::result::Result<(), $crate::Error> {
                dest.enumeration(*self as usize, Self::NAMES)
            }
        }
    };
}
