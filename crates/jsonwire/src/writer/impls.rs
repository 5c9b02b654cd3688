use alloc::{string::String, vec::Vec};

use super::{WriteJson, Writer};
use crate::{
    error::{Error, Schema},
    protocol::write_array,
};

impl WriteJson for bool {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        dest.boolean(*self)
    }
}

macro_rules! write_integer {
    ($method:ident as $wide:ty: $($ty:ty),* $(,)?) => {$(
        impl WriteJson for $ty {
            fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
                dest.$method(<$wide>::from(*self))
            }
        }
    )*};
}

write_integer!(unsigned_integer as u64: u8, u16, u32, u64);
write_integer!(integer as i64: i8, i16, i32, i64);

impl WriteJson for usize {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        let value =
            u64::try_from(*self).map_err(|_| dest.out_of_range(Schema::SmallerInteger))?;
        dest.unsigned_integer(value)
    }
}

impl WriteJson for isize {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        let value = i64::try_from(*self).map_err(|_| {
            dest.out_of_range(if *self < 0 {
                Schema::LargerInteger
            } else {
                Schema::SmallerInteger
            })
        })?;
        dest.integer(value)
    }
}

impl WriteJson for f64 {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        dest.real(*self)
    }
}

impl WriteJson for str {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        dest.string(self)
    }
}

impl WriteJson for String {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        dest.string(self)
    }
}

impl<T: WriteJson + ?Sized> WriteJson for &T {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        (**self).write_json(dest)
    }
}

/// Fixed-width binary, as a hex string.
impl<const N: usize> WriteJson for [u8; N] {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        dest.binary(self)
    }
}

impl<T: WriteJson> WriteJson for [T] {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_array(dest, self)
    }
}

impl<T: WriteJson> WriteJson for Vec<T> {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_array(dest, self)
    }
}
