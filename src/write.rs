//! Encoding of tag trees back into NBT bytes.

use std::convert::TryInto;
use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::{Tag, TagType, Value, MAX_DEPTH};

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: TagType) -> Result<()> {
        self.write_u8(tag.into())?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, key: &str) -> Result<()> {
        let len: u16 = key
            .len()
            .try_into()
            .map_err(|_| Error::format(format!("string too long: {} bytes", key.len())))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(key.as_bytes())?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        self.write_i32::<BigEndian>(
            len.try_into()
                .map_err(|_| Error::format(format!("len too large: {}", len)))?,
        )?;

        Ok(())
    }

    /// Write the payload of `value`, a tag at `depth` with the root at 1.
    fn write_payload(&mut self, value: &Value, depth: usize) -> Result<()> {
        if value.tag_type().is_container() && depth > MAX_DEPTH {
            return Err(Error::format(format!(
                "{} nested deeper than {} levels",
                value.tag_type(),
                MAX_DEPTH
            )));
        }
        match value {
            Value::Byte(v) => self.write_i8(*v)?,
            Value::Short(v) => self.write_i16::<BigEndian>(*v)?,
            Value::Int(v) => self.write_i32::<BigEndian>(*v)?,
            Value::Long(v) => self.write_i64::<BigEndian>(*v)?,
            Value::Float(v) => self.write_f32::<BigEndian>(*v)?,
            Value::Double(v) => self.write_f64::<BigEndian>(*v)?,
            Value::String(v) => self.write_size_prefixed_str(v)?,
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                let bytes: Vec<u8> = v.iter().map(|&b| b as u8).collect();
                self.write_all(&bytes)?;
            }
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                for i in v {
                    self.write_i32::<BigEndian>(*i)?;
                }
            }
            Value::List(list) => {
                // Lists that never had a type can only be empty.
                let element_type = match list.element_type() {
                    TagType::Unknown => TagType::End,
                    t => t,
                };
                self.write_tag(element_type)?;
                self.write_len(list.len())?;
                for v in list.iter() {
                    self.write_payload(v, depth + 1)?;
                }
            }
            Value::Compound(compound) => {
                for (name, v) in compound.iter() {
                    self.write_tag(v.tag_type())?;
                    self.write_size_prefixed_str(name)?;
                    self.write_payload(v, depth + 1)?;
                }
                self.write_tag(TagType::End)?;
            }
        }
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

/// Write `root` as an uncompressed NBT document. The root must be a named
/// compound, as the format requires.
///
/// Wrap the writer in a `flate2` encoder for the usual gzipped form.
pub fn to_writer<W: Write>(mut writer: W, root: &Tag) -> Result<()> {
    let name = root
        .name()
        .ok_or_else(|| Error::usage("root tag must be named"))?;
    if root.tag_type() != TagType::Compound {
        return Err(Error::usage(format!(
            "root tag must be a compound, not {}",
            root.tag_type()
        )));
    }

    writer.write_tag(TagType::Compound)?;
    writer.write_size_prefixed_str(name)?;
    writer.write_payload(root.value(), 1)
}

/// Write `root` as an uncompressed NBT document into a new buffer.
pub fn to_bytes(root: &Tag) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    to_writer(&mut bytes, root)?;
    Ok(bytes)
}
