mod decode_bad;
mod decode_good;

use alloc::{string::String, vec::Vec};

use crate::{
    Error, ReadJson, Reader, Schema, WriteJson, Writer, read_field, read_object, wire_enum, write_field,
    write_object,
};

wire_enum! {
    #[derive(Default)]
    pub(crate) enum Network {
        #[default]
        Mainnet = "mainnet",
        Testnet = "testnet",
        Stagenet = "stagenet",
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Child {
    pub(crate) id: [u8; 4],
    pub(crate) depth: i16,
}

impl ReadJson for Child {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.id), read_field!(self.depth)])
    }
}

impl WriteJson for Child {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_object(dest, [write_field!(self.id), write_field!(self.depth)])
    }
}

/// Exercises every built-in field kind.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Sample {
    pub(crate) flag: bool,
    pub(crate) small: u8,
    pub(crate) signed: i32,
    pub(crate) wide: u64,
    pub(crate) ratio: f64,
    pub(crate) name: String,
    pub(crate) network: Network,
    pub(crate) tags: Vec<String>,
    pub(crate) children: Vec<Child>,
}

impl ReadJson for Sample {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(
            source,
            [
                read_field!(self.flag),
                read_field!(self.small),
                read_field!(self.signed),
                read_field!(self.wide),
                read_field!(self.ratio),
                read_field!(self.name),
                read_field!(self.network),
                read_field!(self.tags),
                read_field!(self.children),
            ],
        )
    }
}

impl WriteJson for Sample {
    fn write_json(&self, dest: &mut Writer) -> Result<(), Error> {
        write_object(
            dest,
            [
                write_field!(self.flag),
                write_field!(self.small),
                write_field!(self.signed),
                write_field!(self.wide),
                write_field!(self.ratio),
                write_field!(self.name),
                write_field!(self.network),
                write_field!(self.tags),
                write_field!(self.children),
            ],
        )
    }
}

/// A single required field, as in a transaction pool entry.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct TxHash {
    pub(crate) tx_hash: [u8; 32],
}

impl ReadJson for TxHash {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        read_object(source, [read_field!(self.tx_hash)])
    }
}

/// Arrays nested `depth` levels deep around a single `1`.
pub(crate) fn nested_arrays(depth: usize) -> String {
    let mut json = "[".repeat(depth);
    json.push('1');
    json.push_str(&"]".repeat(depth));
    json
}

/// Single-element arrays nested exactly `depth` levels deep around an
/// integer.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct NestedArrays {
    pub(crate) depth: usize,
    pub(crate) value: u8,
}

impl ReadJson for NestedArrays {
    fn read_json(&mut self, source: &mut Reader) -> Result<(), Error> {
        for _ in 0..self.depth {
            source.start_array()?;
            if source.is_array_end(0)? {
                return Err(source.error(Schema::Array));
            }
        }
        self.value = source.integer_as()?;
        for _ in 0..self.depth {
            if !source.is_array_end(1)? {
                return Err(source.error(Schema::Array));
            }
            source.end_array();
        }
        Ok(())
    }
}

/// Decodes `nested_arrays(depth)` with default options.
pub(crate) fn decode_nested(depth: usize) -> Result<u8, Error> {
    let mut reader = Reader::new(nested_arrays(depth));
    let mut target = NestedArrays { depth, value: 0 };
    target.read_json(&mut reader)?;
    reader.check_complete()?;
    Ok(target.value)
}
