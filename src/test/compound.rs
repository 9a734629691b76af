use crate::error::{ErrorKind, Result, Violation};
use crate::{Compound, List, Tag, TagType, Value};

fn abc() -> Compound {
    Compound::new()
        .with("a", 1i8)
        .unwrap()
        .with("b", 2i16)
        .unwrap()
        .with("c", "three")
        .unwrap()
}

#[test]
fn names_keep_insertion_order() {
    let c = abc();
    assert_eq!(c.names().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(
        c.iter().map(|(_, v)| v.tag_type()).collect::<Vec<_>>(),
        [TagType::Byte, TagType::Short, TagType::String]
    );
}

#[test]
fn insert_unnamed_is_refused() {
    let mut c = abc();
    let err = c.insert(Tag::unnamed(4)).unwrap_err();
    assert_eq!(err.error().violation(), Some(&Violation::Unnamed));
    assert_eq!(err.into_inner(), Tag::unnamed(4));
    assert_eq!(c, abc());
}

#[test]
fn insert_duplicate_is_refused() {
    let mut c = abc();
    let err = c.insert(Tag::named("b", 100)).unwrap_err();
    assert_eq!(
        err.error().violation(),
        Some(&Violation::DuplicateName("b".to_owned()))
    );
    assert_eq!(err.into_inner(), Tag::named("b", 100));
    assert_eq!(c.get_short("b").unwrap(), Some(2));
    assert_eq!(c.len(), 3);

    let err = c.insert_value("c", 1.5f64).unwrap_err();
    assert_eq!(err.into_inner(), Value::Double(1.5));
    assert_eq!(c.get_str("c").unwrap(), Some("three"));
}

#[test]
fn insert_error_converts_to_error() {
    fn add(c: &mut Compound) -> Result<()> {
        c.insert(Tag::named("a", 0))?;
        Ok(())
    }

    let err = add(&mut abc()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Invariant(Violation::DuplicateName(_))
    ));
}

#[test]
fn from_tags() {
    let c = Compound::from_tags(vec![Tag::named("x", 1), Tag::named("y", 2)]).unwrap();
    assert_eq!(c.names().collect::<Vec<_>>(), ["x", "y"]);

    let err = Compound::from_tags(vec![Tag::named("x", 1), Tag::unnamed(2)]).unwrap_err();
    assert_eq!(err.into_inner(), Tag::unnamed(2));

    let err = Compound::from_tags(vec![Tag::named("x", 1), Tag::named("x", 2)]).unwrap_err();
    assert_eq!(err.into_inner(), Tag::named("x", 2));
}

#[test]
fn extend_keeps_tags_before_the_failure() {
    let mut c = Compound::new();
    let err = c
        .extend_tags(vec![
            Tag::named("one", 1),
            Tag::named("two", 2),
            Tag::named("one", 3),
            Tag::named("four", 4),
        ])
        .unwrap_err();
    assert_eq!(err.into_inner(), Tag::named("one", 3));
    assert_eq!(c.names().collect::<Vec<_>>(), ["one", "two"]);
    assert_eq!(c.get_int("one").unwrap(), Some(1));
}

#[test]
fn typed_getters() -> Result<()> {
    let c = Compound::new()
        .with("byte", 1i8)?
        .with("short", 2i16)?
        .with("int", 3)?
        .with("long", 4i64)?
        .with("float", 5.5f32)?
        .with("double", 6.5f64)?
        .with("str", "s")?
        .with("bytes", vec![1i8, 2])?
        .with("ints", vec![3, 4])?
        .with("list", List::from_values(vec![1, 2, 3])?)?
        .with("compound", Compound::new().with("inner", true)?)?;

    assert_eq!(c.get_byte("byte")?, Some(1));
    assert_eq!(c.get_short("short")?, Some(2));
    assert_eq!(c.get_int("int")?, Some(3));
    assert_eq!(c.get_long("long")?, Some(4));
    assert_eq!(c.get_float("float")?, Some(5.5));
    assert_eq!(c.get_double("double")?, Some(6.5));
    assert_eq!(c.get_str("str")?, Some("s"));
    assert_eq!(c.get_byte_array("bytes")?, Some(&[1i8, 2][..]));
    assert_eq!(c.get_int_array("ints")?, Some(&[3, 4][..]));
    assert_eq!(c.get_list("list")?.map(List::len), Some(3));
    assert_eq!(
        c.get_compound("compound")?.map(|c| c.get_byte("inner")),
        Some(Ok(Some(1)))
    );

    assert_eq!(c.get_int("missing")?, None);
    assert_eq!(c.get_compound("missing")?, None);
    Ok(())
}

#[test]
fn typed_getter_wrong_type() {
    let c = abc();
    let err = c.get_int("a").unwrap_err();
    assert_eq!(
        err.violation(),
        Some(&Violation::WrongType {
            expected: TagType::Int,
            found: TagType::Byte
        })
    );

    // no widening here, unlike the reader
    assert!(c.get_long("b").is_err());
    assert!(c.get_list("c").is_err());
}

#[test]
fn nested_mutation() -> Result<()> {
    let mut c = Compound::new()
        .with("inner", Compound::new())?
        .with("list", List::with_type(TagType::Int))?;

    c.get_compound_mut("inner")?
        .unwrap()
        .insert_value("deep", 1i64)?;
    c.get_list_mut("list")?.unwrap().push(7)?;

    assert_eq!(
        c.get_compound("inner")?.unwrap().get_long("deep")?,
        Some(1)
    );
    assert_eq!(c.get_list("list")?.unwrap().get(0), Some(&Value::Int(7)));

    assert!(c.get_list_mut("inner").is_err());
    assert!(c.get_compound_mut("list").is_err());
    assert!(c.get_compound_mut("missing")?.is_none());
    Ok(())
}

#[test]
fn remove_gives_back_named_tag() {
    let mut c = abc();
    let b = c.remove("b").unwrap();
    assert_eq!(b, Tag::named("b", 2i16));
    assert!(!c.contains("b"));
    assert_eq!(c.names().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(c.remove("b"), None);

    // the removed tag can go somewhere else
    let mut other = Compound::new();
    other.insert(b).unwrap();
    assert_eq!(other.get_short("b").unwrap(), Some(2));
}

#[test]
fn rename_in_place() -> Result<()> {
    let mut c = abc();
    assert!(c.rename("b", "bee")?);
    assert_eq!(c.names().collect::<Vec<_>>(), ["a", "bee", "c"]);
    assert_eq!(c.get_short("bee")?, Some(2));

    assert!(!c.rename("nothing", "x")?);
    assert!(c.rename("a", "a")?);

    let err = c.rename("a", "c").unwrap_err();
    assert_eq!(
        err.violation(),
        Some(&Violation::DuplicateName("c".to_owned()))
    );
    assert_eq!(c.names().collect::<Vec<_>>(), ["a", "bee", "c"]);
    Ok(())
}

#[test]
fn replace_keeps_position() {
    let mut c = abc();
    assert_eq!(c.replace("b", 20i16), Some(Value::Short(2)));
    assert_eq!(c.replace("d", 4), None);
    assert_eq!(c.names().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
    assert_eq!(c.get_short("b").unwrap(), Some(20));
}

#[test]
fn clear_and_into_tags() {
    let mut c = abc();
    let tags: Vec<_> = c.clone().into_tags().collect();
    assert_eq!(tags[0], Tag::named("a", 1i8));
    assert_eq!(tags.len(), 3);

    c.clear();
    assert!(c.is_empty());
    assert_eq!(c.len(), 0);
}

#[test]
fn iter_mut_changes_values() {
    let mut c = Compound::new().with("x", 1).unwrap().with("y", 2).unwrap();
    for (_, v) in c.iter_mut() {
        if let Value::Int(i) = v {
            *i *= 10;
        }
    }
    assert_eq!(c.get_int("y").unwrap(), Some(20));
}

#[test]
fn serializes_as_json_object() {
    let c = Compound::new()
        .with("name", "Steve")
        .unwrap()
        .with("pos", List::from_values(vec![1.5f64, 2.0]).unwrap())
        .unwrap()
        .with("flags", vec![1i8, 0])
        .unwrap();
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, r#"{"name":"Steve","pos":[1.5,2.0],"flags":[1,0]}"#);
}

#[test]
fn tag_display() {
    let root = Compound::new()
        .with("n", 1)
        .unwrap()
        .with("l", List::from_values(vec!["x"]).unwrap())
        .unwrap();
    let text = Tag::named("root", root).to_string();
    assert_eq!(
        text,
        "TAG_Compound(\"root\"): 2 entries\n{\n    TAG_Int(\"n\"): 1\n    TAG_List(\"l\"): 1 entries of TAG_String\n    {\n        TAG_String: \"x\"\n    }\n}"
    );
}
