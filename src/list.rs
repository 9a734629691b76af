use serde::{Serialize, Serializer};

use crate::{
    error::{Error, InsertError, Result, Violation},
    Compound, TagType, Value,
};

/// An NBT list: unnamed values that all share one element type.
///
/// The element type is fixed either up front with [`List::with_type`] or by
/// the first value pushed into a list made with [`List::new`]. After that,
/// values of any other type are refused.
///
/// ```
/// # use nbtreader::{List, TagType, Value};
/// let mut list = List::new();
/// assert_eq!(list.element_type(), TagType::Unknown);
///
/// list.push(1i16).unwrap();
/// assert_eq!(list.element_type(), TagType::Short);
///
/// let err = list.push("nope").unwrap_err();
/// assert_eq!(err.into_inner(), Value::from("nope"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element_type: TagType,
    values: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl List {
    /// Empty list with no element type yet.
    pub fn new() -> Self {
        Self {
            element_type: TagType::Unknown,
            values: Vec::new(),
        }
    }

    /// Empty list that only accepts `element_type`. `TagType::End` is what an
    /// empty list looks like on the wire and is treated as no type at all.
    pub fn with_type(element_type: TagType) -> Self {
        let element_type = match element_type {
            TagType::End => TagType::Unknown,
            t => t,
        };
        Self {
            element_type,
            values: Vec::new(),
        }
    }

    /// Build a list from values, in order. Stops at the first value whose type
    /// differs from the ones before it.
    pub fn from_values<I, V>(values: I) -> std::result::Result<Self, InsertError<Value>>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut list = Self::new();
        for v in values {
            list.push(v)?;
        }
        Ok(list)
    }

    /// Element type, or `TagType::Unknown` for a list that has never been
    /// given one.
    pub fn element_type(&self) -> TagType {
        self.element_type
    }

    fn check(&self, value: Value) -> std::result::Result<Value, InsertError<Value>> {
        let found = value.tag_type();
        if self.element_type != TagType::Unknown && self.element_type != found {
            return Err(InsertError::new(
                Violation::TypeMismatch {
                    expected: self.element_type,
                    found,
                },
                value,
            ));
        }
        Ok(value)
    }

    fn claim_type(&mut self, value: &Value) {
        if self.element_type == TagType::Unknown {
            self.element_type = value.tag_type();
        }
    }

    pub fn push(&mut self, value: impl Into<Value>) -> std::result::Result<(), InsertError<Value>> {
        let value = self.check(value.into())?;
        self.claim_type(&value);
        self.values.push(value);
        Ok(())
    }

    /// Insert at `index`, shifting later elements along. `index` may equal
    /// the length, which appends.
    pub fn insert(
        &mut self,
        index: usize,
        value: impl Into<Value>,
    ) -> std::result::Result<(), InsertError<Value>> {
        let value = value.into();
        if index > self.values.len() {
            let len = self.values.len();
            return Err(InsertError::new(
                Violation::IndexOutOfRange { index, len },
                value,
            ));
        }
        let value = self.check(value)?;
        self.claim_type(&value);
        self.values.insert(index, value);
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(
        &mut self,
        index: usize,
        value: impl Into<Value>,
    ) -> std::result::Result<Value, InsertError<Value>> {
        let value = value.into();
        if index >= self.values.len() {
            let len = self.values.len();
            return Err(InsertError::new(
                Violation::IndexOutOfRange { index, len },
                value,
            ));
        }
        let value = self.check(value)?;
        Ok(std::mem::replace(&mut self.values[index], value))
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_compound_mut(&mut self, index: usize) -> Result<Option<&mut Compound>> {
        match self.values.get_mut(index) {
            None => Ok(None),
            Some(Value::Compound(c)) => Ok(Some(c)),
            Some(other) => Err(Error::invariant(Violation::WrongType {
                expected: TagType::Compound,
                found: other.tag_type(),
            })),
        }
    }

    pub fn get_list_mut(&mut self, index: usize) -> Result<Option<&mut List>> {
        match self.values.get_mut(index) {
            None => Ok(None),
            Some(Value::List(l)) => Ok(Some(l)),
            Some(other) => Err(Error::invariant(Violation::WrongType {
                expected: TagType::List,
                found: other.tag_type(),
            })),
        }
    }

    /// Take the element at `index` out of the list. The element type stays as
    /// it was even if the list becomes empty.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.values.len() {
            return Err(Error::invariant(Violation::IndexOutOfRange {
                index,
                len: self.values.len(),
            }));
        }
        Ok(self.values.remove(index))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.values.iter())
    }
}
