//! nbtreader reads NBT, the named binary tag format used by *Minecraft* to
//! store nested data such as worlds and player inventories, one tag at a time.
//!
//! * For the streaming pull-parser see [`NbtReader`].
//! * For the in-memory tree see [`Tag`], [`Value`], [`Compound`] and [`List`].
//! * For writing a tree back out see [`to_bytes`] and [`to_writer`].
//!
//! The reader only needs [`std::io::Read`] from its input and never holds
//! more than the current tag in memory, so it can walk multi-gigabyte files
//! and pull out just the parts that matter. Decompression is left to the
//! caller: wrap the input in a `flate2` decoder before handing it over.
//!
//! # Quick example
//!
//! Build a small tree, encode it, then pull a single value back out without
//! materializing anything else.
//!
//! ```
//! use nbtreader::{Compound, NbtReader, Tag};
//!
//! # fn main() -> nbtreader::error::Result<()> {
//! let player = Compound::new()
//!     .with("Name", "Steve")?
//!     .with("Health", 20.0f32)?
//!     .with("XpLevel", 7)?;
//! let bytes = nbtreader::to_bytes(&Tag::named("Player", player))?;
//!
//! let mut reader = NbtReader::new(bytes.as_slice());
//! assert!(reader.read_to_following_named("XpLevel")?);
//! let level: i64 = reader.read_value_as()?;
//! assert_eq!(level, 7);
//! # Ok(())
//! # }
//! ```
//!
//! # Materializing part of a stream
//!
//! Any position can be turned into a [`Tag`] with
//! [`NbtReader::read_as_tag`], which also moves the reader past the whole
//! subtree.
//!
//! ```
//! use nbtreader::{Compound, List, NbtReader, Tag, TagType};
//!
//! # fn main() -> nbtreader::error::Result<()> {
//! let pos = List::from_values(vec![1.0f64, 64.0, -3.5])?;
//! let root = Compound::new().with("Pos", pos)?.with("OnGround", 1i8)?;
//! let bytes = nbtreader::to_bytes(&Tag::named("", root))?;
//!
//! let mut reader = NbtReader::new(bytes.as_slice());
//! reader.read_to_following_named("Pos")?;
//! let pos = reader.read_as_tag()?;
//! assert_eq!(pos.name(), Some("Pos"));
//! assert_eq!(pos.tag_type(), TagType::List);
//! assert_eq!(reader.tag_name(), Some("OnGround"));
//! # Ok(())
//! # }
//! ```

use std::convert::TryFrom;
use std::io::Read;

pub mod error;

mod coerce;
mod compound;
mod input;
mod list;
mod reader;
mod tag;
mod value;
mod write;

pub use coerce::Primitive;
pub use compound::Compound;
pub use list::List;
pub use reader::{NbtReader, ReaderOptions};
pub use tag::Tag;
pub use value::Value;
pub use write::{to_bytes, to_writer};

#[cfg(test)]
mod test;

/// Deepest nesting of compounds and lists, counting the root compound as 1,
/// that the reader accepts by default and the writer will produce. This is
/// the limit *Minecraft* itself applies.
pub const MAX_DEPTH: usize = 512;

/// The type of an NBT tag. This does not carry the value or the name of the
/// data.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum TagType {
    /// Represents the end of a Compound object.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// Represents as array of Byte (i8).
    ByteArray = 7,
    /// Represents a Unicode string.
    String = 8,
    /// Represents a list of unnamed values, all of the same type.
    List = 9,
    /// Represents a struct-like structure.
    Compound = 10,
    /// Represents as array of Int (i32).
    IntArray = 11,
    /// No type. Used by the reader where a type does not apply, eg the
    /// element type of something that is not a list. Never written.
    Unknown = 0xff,
}

impl TagType {
    /// Scalars, strings and arrays: the types that carry a value the reader
    /// can hand out with `read_value`.
    pub fn is_value(self) -> bool {
        !matches!(
            self,
            TagType::End | TagType::List | TagType::Compound | TagType::Unknown
        )
    }

    /// Arrays, whose header carries a length.
    pub fn is_array(self) -> bool {
        matches!(self, TagType::ByteArray | TagType::IntArray)
    }

    /// Lists and compounds.
    pub fn is_container(self) -> bool {
        matches!(self, TagType::List | TagType::Compound)
    }
}

// Crates exist to generate this code for us, but would add to our compile
// times, so we instead write it out manually, the tags will very rarely change
// so isn't a massive burden, but saves a significant amount of compile time.
impl TryFrom<u8> for TagType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use TagType::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12..=u8::MAX => return Err(()),
        })
    }
}

impl From<TagType> for u8 {
    fn from(tag: TagType) -> Self {
        tag as u8
    }
}

impl std::fmt::Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TagType::End => "TAG_End",
            TagType::Byte => "TAG_Byte",
            TagType::Short => "TAG_Short",
            TagType::Int => "TAG_Int",
            TagType::Long => "TAG_Long",
            TagType::Float => "TAG_Float",
            TagType::Double => "TAG_Double",
            TagType::ByteArray => "TAG_Byte_Array",
            TagType::String => "TAG_String",
            TagType::List => "TAG_List",
            TagType::Compound => "TAG_Compound",
            TagType::IntArray => "TAG_Int_Array",
            TagType::Unknown => "TAG_Unknown",
        })
    }
}

/// Read a whole document from a byte slice into a tree. The returned tag is
/// the named root compound.
pub fn from_bytes(bytes: &[u8]) -> error::Result<Tag> {
    from_reader(bytes)
}

/// Read a whole document from any reader into a tree. The reader is not
/// required to be seekable.
pub fn from_reader<R: Read>(reader: R) -> error::Result<Tag> {
    NbtReader::new(reader).read_as_tag()
}
