use core::fmt;

use crate::{ReadJson, WriteJson};

/// One member of a record's schema for decoding: a static name and a mutable
/// borrow of the storage to fill.
///
/// Usually built with [`read_field!`](crate::read_field).
pub struct ReadField<'a> {
    pub(crate) name: &'static str,
    pub(crate) value: &'a mut dyn ReadJson,
}

impl<'a> ReadField<'a> {
    /// Pairs `name` with the storage it decodes into.
    pub fn new(name: &'static str, value: &'a mut dyn ReadJson) -> Self {
        Self { name, value }
    }

    /// Name of the member on the wire.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ReadField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadField").field("name", &self.name).finish_non_exhaustive()
    }
}

/// One member of a record's schema for encoding: a static name and a shared
/// borrow of the value to write.
///
/// Usually built with [`write_field!`](crate::write_field).
pub struct WriteField<'a> {
    pub(crate) name: &'static str,
    pub(crate) value: &'a dyn WriteJson,
}

impl<'a> WriteField<'a> {
    /// Pairs `name` with the value written under it.
    pub fn new(name: &'static str, value: &'a dyn WriteJson) -> Self {
        Self { name, value }
    }

    /// Name of the member on the wire.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for WriteField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteField").field("name", &self.name).finish_non_exhaustive()
    }
}
