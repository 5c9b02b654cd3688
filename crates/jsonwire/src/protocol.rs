//! Object and array walking shared by every record type.
//!
//! Objects are described by a fixed-size array of field descriptors built at
//! the call site. Decoding resolves each member name with a linear scan over
//! that array and tracks presence in a parallel `[bool; N]`, so nothing here
//! allocates.

use alloc::{format, vec::Vec};

use crate::{
    Reader, Writer,
    error::{Error, Schema},
    field::{ReadField, WriteField},
    reader::ReadJson,
    writer::WriteJson,
};

/// Upper bound (exclusive) on the number of fields one object may declare.
///
/// Name resolution is a linear scan; larger schemas fail to compile.
///
/// ```rust
/// use jsonwire::{Error, WriteField, Writer, write_object};
///
/// let values = [7u64; 99];
/// let mut writer = Writer::new();
/// write_object(&mut writer, values.each_ref().map(|value| WriteField::new("v", value)))?;
/// assert_eq!(writer.take()?.len(), 2 + 99 * r#""v":7"#.len() + 98);
/// # Ok::<(), Error>(())
/// ```
pub const MAX_OBJECT_FIELDS: usize = 100;

/// Decodes one object into `fields`.
///
/// Members may appear in any order. Names not in `fields` are skipped with
/// their values. Every field is required.
///
/// # Errors
///
/// [`Schema::InvalidKey`] when a field appears twice (context
/// `duplicate <name>`), [`Schema::MissingKey`] naming the first absent field
/// in declaration order, and any error raised by a field's own decoder.
///
/// One field too many is rejected when the schema is compiled:
///
/// ```compile_fail
/// use jsonwire::{Error, ReadField, Reader, read_object};
///
/// fn read_wide(source: &mut Reader, values: &mut [u64; 100]) -> Result<(), Error> {
///     read_object(source, values.each_mut().map(|value| ReadField::new("v", value)))
/// }
///
/// let _ = read_wide(&mut Reader::new("{}"), &mut [0; 100]);
/// ```
pub fn read_object<const N: usize>(
    source: &mut Reader,
    mut fields: [ReadField<'_>; N],
) -> Result<(), Error> {
    const { assert!(N < MAX_OBJECT_FIELDS, "too many fields in one object") };

    source.start_object()?;
    let names = fields.each_ref().map(ReadField::name);
    let mut present = [false; N];
    let mut count = 0;
    while let Some(index) = source.key(&names, count)? {
        if present[index] {
            return Err(source
                .error(Schema::InvalidKey)
                .with_context(format!("duplicate {}", names[index])));
        }
        present[index] = true;
        fields[index].value.read_json(source)?;
        count += 1;
    }
    source.end_object();

    match present.iter().position(|seen| !seen) {
        Some(missing) => Err(source.error(Schema::MissingKey).with_context(names[missing])),
        None => Ok(()),
    }
}

/// Decodes one array, replacing the contents of `dest`.
///
/// # Errors
///
/// [`Schema::Array`] if the next value is not an array, and any error raised
/// while decoding an element.
pub fn read_array<T: ReadJson + Default>(
    source: &mut Reader,
    dest: &mut Vec<T>,
) -> Result<(), Error> {
    source.start_array()?;
    dest.clear();
    while !source.is_array_end(dest.len())? {
        let mut element = T::default();
        element.read_json(source)?;
        dest.push(element);
    }
    source.end_array();
    Ok(())
}

/// Encodes `fields` as one object, in declaration order.
///
/// # Errors
///
/// Any error raised by a field's own encoder.
///
/// As with [`read_object`], oversized schemas do not compile:
///
/// ```compile_fail
/// use jsonwire::{Error, WriteField, Writer, write_object};
///
/// fn write_wide(dest: &mut Writer, values: &[u64; 100]) -> Result<(), Error> {
///     write_object(dest, values.each_ref().map(|value| WriteField::new("v", value)))
/// }
///
/// let _ = write_wide(&mut Writer::new(), &[0; 100]);
/// ```
pub fn write_object<const N: usize>(
    dest: &mut Writer,
    fields: [WriteField<'_>; N],
) -> Result<(), Error> {
    const { assert!(N < MAX_OBJECT_FIELDS, "too many fields in one object") };

    dest.start_object()?;
    for field in fields {
        dest.key(field.name)?;
        field.value.write_json(dest)?;
    }
    dest.end_object()
}

/// Encodes `values` as one array.
///
/// # Errors
///
/// Any error raised while encoding an element.
pub fn write_array<T: WriteJson>(dest: &mut Writer, values: &[T]) -> Result<(), Error> {
    dest.start_array()?;
    for value in values {
        value.write_json(dest)?;
    }
    dest.end_array()
}
