use std::convert::TryFrom;

use crate::TagType;

pub mod builder;
mod compound;
mod write;

macro_rules! check_tags {
    {$($tag:ident = $val:literal),* $(,)?} => {
        $(
            assert_eq!(u8::from(TagType::$tag), $val);
            assert_eq!(TagType::try_from($val as u8).unwrap(), TagType::$tag);
        )*
    };
}

#[test]
fn exhaustive_tag_check() {
    check_tags! {
        End = 0,
        Byte = 1,
        Short = 2,
        Int = 3,
        Long = 4,
        Float = 5,
        Double = 6,
        ByteArray = 7,
        String = 8,
        List = 9,
        Compound = 10,
        IntArray = 11,
    }

    for value in 12..=u8::MAX {
        assert!(TagType::try_from(value).is_err())
    }
}

#[test]
fn tag_type_display() {
    assert_eq!(TagType::Byte.to_string(), "TAG_Byte");
    assert_eq!(TagType::ByteArray.to_string(), "TAG_Byte_Array");
    assert_eq!(TagType::IntArray.to_string(), "TAG_Int_Array");
    assert_eq!(TagType::Unknown.to_string(), "TAG_Unknown");
}

#[test]
fn tag_type_groups() {
    assert!(TagType::String.is_value());
    assert!(TagType::IntArray.is_value());
    assert!(!TagType::List.is_value());
    assert!(!TagType::End.is_value());

    assert!(TagType::ByteArray.is_array());
    assert!(!TagType::String.is_array());

    assert!(TagType::Compound.is_container());
    assert!(!TagType::Int.is_container());
}
