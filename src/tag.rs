use std::fmt::{self, Display, Write};

use serde::Serialize;

use crate::{TagType, Value};

/// A value with an optional name. This is what the reader materializes and
/// what gets inserted into a [`Compound`](crate::Compound).
///
/// Root tags and compound children are named. List elements never are, so a
/// tag read from inside a list comes back with `name() == None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    name: Option<String>,
    value: Value,
}

impl Tag {
    pub fn new(name: Option<String>, value: impl Into<Value>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(Some(name.into()), value)
    }

    pub fn unnamed(value: impl Into<Value>) -> Self {
        Self::new(None, value)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rename a tag that is not inside a container. Tags inside a compound
    /// are renamed through [`Compound::rename`](crate::Compound::rename) so
    /// the compound can keep names unique.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn tag_type(&self) -> TagType {
        self.value.tag_type()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn into_parts(self) -> (Option<String>, Value) {
        (self.name, self.value)
    }
}

impl From<Value> for Tag {
    fn from(value: Value) -> Self {
        Self::unnamed(value)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        pretty(&mut out, self.name(), &self.value, 0)?;
        f.write_str(&out)
    }
}

const INDENT: &str = "    ";

/// Renders one tag as `TAG_Type("name"): value`, with container children on
/// their own indented lines.
fn pretty(out: &mut String, name: Option<&str>, value: &Value, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    write!(out, "{}", value.tag_type())?;
    if let Some(name) = name {
        write!(out, "({:?})", name)?;
    }
    out.push_str(": ");

    match value {
        Value::Byte(v) => write!(out, "{}", v),
        Value::Short(v) => write!(out, "{}", v),
        Value::Int(v) => write!(out, "{}", v),
        Value::Long(v) => write!(out, "{}", v),
        Value::Float(v) => write!(out, "{}", v),
        Value::Double(v) => write!(out, "{}", v),
        Value::String(v) => write!(out, "{:?}", v),
        Value::ByteArray(v) => write!(out, "[{} bytes]", v.len()),
        Value::IntArray(v) => write!(out, "[{} ints]", v.len()),
        Value::List(list) => {
            write!(out, "{} entries of {}", list.len(), list.element_type())?;
            container(out, list.iter().map(|v| (None, v)), depth)
        }
        Value::Compound(compound) => {
            write!(out, "{} entries", compound.len())?;
            container(out, compound.iter().map(|(n, v)| (Some(n), v)), depth)
        }
    }
}

fn container<'a>(
    out: &mut String,
    children: impl Iterator<Item = (Option<&'a str>, &'a Value)>,
    depth: usize,
) -> fmt::Result {
    let mut indent = String::new();
    for _ in 0..depth {
        indent.push_str(INDENT);
    }

    write!(out, "\n{}{{", indent)?;
    for (name, value) in children {
        out.push('\n');
        pretty(out, name, value, depth + 1)?;
    }
    write!(out, "\n{}}}", indent)
}
