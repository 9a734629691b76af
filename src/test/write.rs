use super::builder::Builder;
use super::fixtures;
use crate::error::{ErrorKind, Result};
use crate::{from_bytes, to_bytes, to_writer, Compound, List, Tag, TagType, MAX_DEPTH};

#[test]
fn matches_hand_built_bytes() -> Result<()> {
    let root = Compound::new()
        .with("b", 1i8)?
        .with("s", 2i16)?
        .with("i", 3)?
        .with("l", 4i64)?
        .with("f", 1.5f32)?
        .with("d", 2.5f64)?
        .with("str", "hi")?
        .with("ba", vec![1i8, -1])?
        .with("ia", vec![7, -7])?
        .with("list", List::from_values(vec![1i16, 2])?)?
        .with("inner", Compound::new().with("x", 0i8)?)?;

    let expected = Builder::new()
        .start_compound("root")
        .field("b", 1i8)
        .field("s", 2i16)
        .field("i", 3)
        .field("l", 4i64)
        .field("f", 1.5f32)
        .field("d", 2.5f64)
        .field("str", "hi")
        .field("ba", vec![1i8, -1])
        .field("ia", vec![7i32, -7])
        .start_list("list", TagType::Short, 2)
        .payload(1i16)
        .payload(2i16)
        .start_compound("inner")
        .field("x", 0i8)
        .end_compound()
        .end_compound()
        .build();

    assert_eq!(to_bytes(&Tag::named("root", root))?, expected);
    Ok(())
}

#[test]
fn reads_back_what_it_wrote() -> Result<()> {
    fixtures::assert_value_test(&from_bytes(&to_bytes(&fixtures::value_test())?)?);
    fixtures::assert_small_file(&from_bytes(&to_bytes(&fixtures::small_file())?)?);
    fixtures::assert_big_test(&from_bytes(&to_bytes(&fixtures::big_test())?)?);

    let lists = fixtures::list_test();
    assert_eq!(from_bytes(&to_bytes(&lists)?)?, lists);
    Ok(())
}

#[test]
fn hand_built_document_survives_a_round_trip() -> Result<()> {
    let bytes = fixtures::reader_test();
    let tag = from_bytes(&bytes)?;
    assert_eq!(to_bytes(&tag)?, bytes);
    Ok(())
}

#[test]
fn root_must_be_named_compound() {
    let err = to_bytes(&Tag::unnamed(Compound::new())).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Usage);

    let err = to_bytes(&Tag::named("root", 5)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Usage);
}

#[test]
fn string_too_long() {
    let long = "x".repeat(usize::from(u16::MAX) + 1);
    let root = Compound::new().with("s", long).unwrap();
    let err = to_bytes(&Tag::named("", root)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Format);

    let root = Compound::new()
        .with("s", "x".repeat(usize::from(u16::MAX)))
        .unwrap();
    assert!(to_bytes(&Tag::named("", root)).is_ok());
}

/// A root compound with `depth` compounds nested inside it.
fn nested(depth: usize) -> Tag {
    let mut inner = Compound::new();
    for _ in 1..depth {
        inner = Compound::new().with("c", inner).unwrap();
    }
    Tag::named("", Compound::new().with("c", inner).unwrap())
}

#[test]
fn nesting_limit_is_enforced() -> Result<()> {
    let bytes = to_bytes(&nested(MAX_DEPTH - 1))?;
    assert_eq!(from_bytes(&bytes)?, nested(MAX_DEPTH - 1));

    let err = to_bytes(&nested(MAX_DEPTH)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Format);
    Ok(())
}

#[test]
fn empty_untyped_list_written_as_end() -> Result<()> {
    let root = Compound::new().with("empty", List::new())?;
    let bytes = to_bytes(&Tag::named("", root))?;
    let expected = Builder::new()
        .start_compound("")
        .start_list("empty", TagType::End, 0)
        .end_compound()
        .build();
    assert_eq!(bytes, expected);
    Ok(())
}

#[test]
fn typed_empty_list_keeps_type() -> Result<()> {
    let root = Compound::new().with("empty", List::with_type(TagType::Double))?;
    let tag = from_bytes(&to_bytes(&Tag::named("", root))?)?;
    let list = tag.value().as_compound().unwrap().get_list("empty")?.unwrap();
    assert_eq!(list.element_type(), TagType::Double);
    Ok(())
}

#[test]
fn writes_into_any_writer() -> Result<()> {
    let mut out = std::io::Cursor::new(Vec::new());
    to_writer(&mut out, &fixtures::small_file())?;
    assert_eq!(out.into_inner(), to_bytes(&fixtures::small_file())?);
    Ok(())
}

#[test]
fn write_failure_is_io_error() {
    struct Full;
    impl std::io::Write for Full {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let err = to_writer(Full, &fixtures::small_file()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Io(std::io::ErrorKind::Other));
}
