//! Hand-assembled NBT for tests.

use byteorder::{BigEndian, WriteBytesExt};

use crate::{TagType, Value};

/// Assembles NBT bytes exactly as told. Nothing is checked and nothing is
/// closed automatically, so documents with wrong lengths, bad type ids or
/// missing End tags are as easy to make as valid ones.
///
/// Values are written with their own byte-level code rather than the crate's
/// encoder, so the two can be checked against each other.
#[derive(Default)]
pub struct Builder {
    bytes: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A type id on its own.
    pub fn tag(mut self, tag: TagType) -> Self {
        self.bytes.push(tag.into());
        self
    }

    /// A length-prefixed string, as used for names and string values.
    pub fn name(self, name: &str) -> Self {
        self.raw_str_len(name.len()).raw_bytes(name.as_bytes())
    }

    /// Only the u16 prefix of a string, so it can disagree with what follows.
    pub fn raw_str_len(mut self, len: usize) -> Self {
        let len = u16::try_from(len).unwrap();
        self.bytes.write_u16::<BigEndian>(len).unwrap();
        self
    }

    pub fn raw_bytes(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    pub fn start_compound(self, name: &str) -> Self {
        self.tag(TagType::Compound).name(name)
    }

    pub fn end_compound(self) -> Self {
        self.tag(TagType::End)
    }

    /// Header of a named list. `len` elements are expected to follow, but
    /// that is up to the caller.
    pub fn start_list(self, name: &str, element: TagType, len: i32) -> Self {
        self.tag(TagType::List).name(name).list_header(element, len)
    }

    /// What follows the name of a list, which is all an unnamed list inside
    /// another list has.
    pub fn list_header(self, element: TagType, len: i32) -> Self {
        self.tag(element).payload(len)
    }

    /// A named tag holding a scalar, string or array.
    pub fn field(self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.tag(value.tag_type()).name(name).payload(value)
    }

    /// A value without any header, eg a list element or a bare length.
    /// Arrays carry their length prefix.
    pub fn payload(mut self, value: impl Into<Value>) -> Self {
        let out = &mut self.bytes;
        match value.into() {
            Value::Byte(v) => out.write_i8(v).unwrap(),
            Value::Short(v) => out.write_i16::<BigEndian>(v).unwrap(),
            Value::Int(v) => out.write_i32::<BigEndian>(v).unwrap(),
            Value::Long(v) => out.write_i64::<BigEndian>(v).unwrap(),
            Value::Float(v) => out.write_f32::<BigEndian>(v).unwrap(),
            Value::Double(v) => out.write_f64::<BigEndian>(v).unwrap(),
            Value::String(v) => return self.name(&v),
            Value::ByteArray(v) => {
                out.write_i32::<BigEndian>(v.len() as i32).unwrap();
                out.extend(v.iter().map(|&b| b as u8));
            }
            Value::IntArray(v) => {
                out.write_i32::<BigEndian>(v.len() as i32).unwrap();
                for i in v {
                    out.write_i32::<BigEndian>(i).unwrap();
                }
            }
            Value::List(_) | Value::Compound(_) => {
                panic!("containers are assembled with start_list and start_compound")
            }
        }
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
