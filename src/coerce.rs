//! Conversion of decoded values to the type a caller asked for.
//!
//! Only widening is allowed: integers to larger integers or to either float,
//! and `f32` to `f64`. Strings and arrays only convert to themselves.

use crate::{
    error::{Error, Result},
    TagType, Value,
};

mod private {
    pub trait Sealed {}
}

/// Rust types that a value tag can be read as with
/// [`NbtReader::read_value_as`](crate::NbtReader::read_value_as) and
/// [`NbtReader::read_list_as_array`](crate::NbtReader::read_list_as_array).
///
/// | stored     | can be read as                                   |
/// |------------|--------------------------------------------------|
/// | Byte       | `i8`, `i16`, `i32`, `i64`, `f32`, `f64`          |
/// | Short      | `i16`, `i32`, `i64`, `f32`, `f64`                |
/// | Int        | `i32`, `i64`, `f32`, `f64`                       |
/// | Long       | `i64`, `f32`, `f64`                              |
/// | Float      | `f32`, `f64`                                     |
/// | Double     | `f64`                                            |
/// | String     | `String`                                         |
/// | ByteArray  | `Vec<i8>`                                        |
/// | IntArray   | `Vec<i32>`                                       |
pub trait Primitive: Sized + private::Sealed {
    /// The tag type this Rust type corresponds to exactly.
    const TAG: TagType;

    #[doc(hidden)]
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! primitive {
    ($type:ty, $variant:ident) => {
        impl private::Sealed for $type {}

        impl Primitive for $type {
            const TAG: TagType = TagType::$variant;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

primitive!(i8, Byte);
primitive!(i16, Short);
primitive!(i32, Int);
primitive!(i64, Long);
primitive!(f32, Float);
primitive!(f64, Double);
primitive!(String, String);
primitive!(Vec<i8>, ByteArray);
primitive!(Vec<i32>, IntArray);

/// Whether values stored as `from` can be read as `to`.
pub(crate) fn can_coerce(from: TagType, to: TagType) -> bool {
    use TagType::*;
    match (from, to) {
        (a, b) if a == b => a.is_value(),
        (Byte, Short | Int | Long | Float | Double) => true,
        (Short, Int | Long | Float | Double) => true,
        (Int, Long | Float | Double) => true,
        (Long, Float | Double) => true,
        (Float, Double) => true,
        _ => false,
    }
}

fn widen(value: Value, to: TagType) -> Option<Value> {
    use Value::*;
    Some(match (value, to) {
        (v, t) if v.tag_type() == t => v,
        (Byte(v), TagType::Short) => Short(v.into()),
        (Byte(v), TagType::Int) => Int(v.into()),
        (Short(v), TagType::Int) => Int(v.into()),
        (Byte(v), TagType::Long) => Long(v.into()),
        (Short(v), TagType::Long) => Long(v.into()),
        (Int(v), TagType::Long) => Long(v.into()),
        (Byte(v), TagType::Float) => Float(v.into()),
        (Short(v), TagType::Float) => Float(v.into()),
        (Int(v), TagType::Float) => Float(v as f32),
        (Long(v), TagType::Float) => Float(v as f32),
        (Byte(v), TagType::Double) => Double(v.into()),
        (Short(v), TagType::Double) => Double(v.into()),
        (Int(v), TagType::Double) => Double(v.into()),
        (Long(v), TagType::Double) => Double(v as f64),
        (Float(v), TagType::Double) => Double(v.into()),
        _ => return None,
    })
}

/// Convert a decoded value to `T`, or fail with a usage error if the table
/// does not allow it.
pub(crate) fn coerce<T: Primitive>(value: Value) -> Result<T> {
    let from = value.tag_type();
    if !can_coerce(from, T::TAG) {
        return Err(Error::usage(format!("cannot read {} as {}", from, T::TAG)));
    }
    widen(value, T::TAG)
        .and_then(T::from_value)
        .ok_or_else(|| Error::usage(format!("cannot read {} as {}", from, T::TAG)))
}
