use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::{
    error::{Error, InsertError, Result, Violation},
    List, Tag, TagType, Value,
};

/// An NBT compound: uniquely named children kept in insertion order.
///
/// Every way of adding a child checks that it has a name not already in use,
/// and leaves the compound untouched when it refuses. A rejected [`Tag`] or
/// [`Value`] is handed back inside the [`InsertError`].
///
/// Children are owned by value. Putting a tag into a compound moves it there,
/// so the same tag cannot sit in two containers, and a compound cannot be
/// placed inside itself:
///
/// ```compile_fail
/// # use nbtreader::{Compound, Tag};
/// let mut a = Compound::new();
/// let mut b = Compound::new();
/// let tag = Tag::named("shared", 1);
/// a.insert(tag).unwrap();
/// b.insert(tag).unwrap(); // `tag` now belongs to `a`
/// ```
///
/// ```compile_fail
/// # use nbtreader::Compound;
/// let mut c = Compound::new();
/// c.insert_value("myself", c).unwrap();
/// ```
///
/// To move a child between containers, [`remove`](Compound::remove) it first:
///
/// ```
/// # use nbtreader::{Compound, Tag};
/// # fn main() -> nbtreader::error::Result<()> {
/// let mut a = Compound::new().with("moving", 1)?;
/// let mut b = Compound::new();
/// let tag = a.remove("moving").unwrap();
/// b.insert(tag)?;
/// assert!(a.is_empty());
/// assert_eq!(b.get_int("moving")?, Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    entries: IndexMap<String, Value>,
}

fn wrong_type(expected: TagType, found: &Value) -> Error {
    Error::invariant(Violation::WrongType {
        expected,
        found: found.tag_type(),
    })
}

macro_rules! typed_get {
    ($(#[$doc:meta])* $fn:ident, $variant:ident, $ty:ty, |$v:ident| $conv:expr) => {
        $(#[$doc])*
        pub fn $fn(&self, name: &str) -> Result<Option<$ty>> {
            match self.entries.get(name) {
                None => Ok(None),
                Some(Value::$variant($v)) => Ok(Some($conv)),
                Some(other) => Err(wrong_type(TagType::$variant, other)),
            }
        }
    };
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a compound from named tags, in order. Stops at the first tag
    /// that is unnamed or reuses a name.
    pub fn from_tags<I>(tags: I) -> std::result::Result<Self, InsertError<Tag>>
    where
        I: IntoIterator<Item = Tag>,
    {
        let mut compound = Self::new();
        compound.extend_tags(tags)?;
        Ok(compound)
    }

    /// Builder form of [`insert_value`](Compound::insert_value).
    ///
    /// ```
    /// # use nbtreader::Compound;
    /// # fn main() -> nbtreader::error::Result<()> {
    /// let c = Compound::new().with("a", 1i8)?.with("b", "two")?;
    /// assert_eq!(c.names().collect::<Vec<_>>(), ["a", "b"]);
    ///
    /// let dupe = Compound::new().with("a", 1i8)?.with("a", 2i8);
    /// assert!(dupe.is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn with(
        mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> std::result::Result<Self, InsertError<Value>> {
        self.insert_value(name, value)?;
        Ok(self)
    }

    /// Add a named tag at the end. Fails if the tag has no name or the name
    /// is taken.
    pub fn insert(&mut self, tag: Tag) -> std::result::Result<(), InsertError<Tag>> {
        match tag.name() {
            None => Err(InsertError::new(Violation::Unnamed, tag)),
            Some(name) if self.entries.contains_key(name) => Err(InsertError::new(
                Violation::DuplicateName(name.to_owned()),
                tag,
            )),
            Some(_) => {
                let (name, value) = tag.into_parts();
                // Checked to be Some above.
                if let Some(name) = name {
                    self.entries.insert(name, value);
                }
                Ok(())
            }
        }
    }

    /// Add a value under `name` at the end. Fails if the name is taken.
    pub fn insert_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> std::result::Result<(), InsertError<Value>> {
        let name = name.into();
        let value = value.into();
        if self.entries.contains_key(&name) {
            return Err(InsertError::new(Violation::DuplicateName(name), value));
        }
        self.entries.insert(name, value);
        Ok(())
    }

    /// Set `name` to `value`, keeping the position of an existing child with
    /// that name. Returns the value it replaced.
    pub fn replace(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Insert each tag in turn. Tags before the first rejected one stay
    /// inserted.
    pub fn extend_tags<I>(&mut self, tags: I) -> std::result::Result<(), InsertError<Tag>>
    where
        I: IntoIterator<Item = Tag>,
    {
        for tag in tags {
            self.insert(tag)?;
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name)
    }

    typed_get!(get_byte, Byte, i8, |v| *v);
    typed_get!(get_short, Short, i16, |v| *v);
    typed_get!(get_int, Int, i32, |v| *v);
    typed_get!(get_long, Long, i64, |v| *v);
    typed_get!(get_float, Float, f32, |v| *v);
    typed_get!(get_double, Double, f64, |v| *v);
    typed_get!(get_str, String, &str, |v| v.as_str());
    typed_get!(get_byte_array, ByteArray, &[i8], |v| v.as_slice());
    typed_get!(get_int_array, IntArray, &[i32], |v| v.as_slice());
    typed_get!(
        /// Get a child list. `Ok(None)` if there is no child called `name`,
        /// an error if there is one but it is not a list.
        get_list, List, &List, |v| v
    );
    typed_get!(get_compound, Compound, &Compound, |v| v);

    pub fn get_list_mut(&mut self, name: &str) -> Result<Option<&mut List>> {
        match self.entries.get_mut(name) {
            None => Ok(None),
            Some(Value::List(l)) => Ok(Some(l)),
            Some(other) => Err(wrong_type(TagType::List, other)),
        }
    }

    pub fn get_compound_mut(&mut self, name: &str) -> Result<Option<&mut Compound>> {
        match self.entries.get_mut(name) {
            None => Ok(None),
            Some(Value::Compound(c)) => Ok(Some(c)),
            Some(other) => Err(wrong_type(TagType::Compound, other)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Take a child out, giving back ownership of it as a named tag. The
    /// order of the remaining children is unchanged.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.entries
            .shift_remove_entry(name)
            .map(|(name, value)| Tag::named(name, value))
    }

    /// Rename a child in place. Returns `Ok(false)` if there is no child
    /// called `from`, and fails if `to` is already used by another child.
    pub fn rename(&mut self, from: &str, to: impl Into<String>) -> Result<bool> {
        let to = to.into();
        if !self.entries.contains_key(from) {
            return Ok(false);
        }
        if from == to {
            return Ok(true);
        }
        if self.entries.contains_key(&to) {
            return Err(Error::invariant(Violation::DuplicateName(to)));
        }

        let entries = std::mem::take(&mut self.entries);
        self.entries = entries
            .into_iter()
            .map(|(name, value)| {
                if name == from {
                    (to.clone(), value)
                } else {
                    (name, value)
                }
            })
            .collect();
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Child names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Release every child as a named tag, in order.
    pub fn into_tags(self) -> impl Iterator<Item = Tag> {
        self.entries
            .into_iter()
            .map(|(name, value)| Tag::named(name, value))
    }
}

impl Serialize for Compound {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}
