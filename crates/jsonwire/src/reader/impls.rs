use alloc::{string::String, vec::Vec};

use super::{ReadJson, Reader};
use crate::{error::Error, protocol::read_array};

impl ReadJson for bool {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        *self = source.boolean()?;
        Ok(())
    }
}

macro_rules! read_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl ReadJson for $ty {
            fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
                *self = source.integer_as::<$ty>()?;
                Ok(())
            }
        }
    )*};
}

read_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl ReadJson for f64 {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        *self = source.real()?;
        Ok(())
    }
}

impl ReadJson for String {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        let value = source.string_ref()?;
        self.clear();
        self.push_str(value);
        Ok(())
    }
}

/// Fixed-width binary, as a hex string.
impl<const N: usize> ReadJson for [u8; N] {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        source.binary(self)
    }
}

impl<T: ReadJson + Default> ReadJson for Vec<T> {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_array(source, self)
    }
}
