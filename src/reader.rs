//! Pull-parser that walks NBT one tag at a time.

use std::fmt::{self, Display};
use std::io::{Read, Seek};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    coerce::{can_coerce, coerce},
    error::{Error, Result},
    input::Input,
    Compound, List, Primitive, Tag, TagType, Value, MAX_DEPTH,
};

/// Settings for an [`NbtReader`].
///
/// Missing fields take their defaults when deserialized, so these can be
/// embedded in an application's own config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Step over the End tag that closes each compound instead of stopping
    /// on it. Defaults to `true`.
    pub skip_end_tags: bool,

    /// Keep the last value read so `read_value` can be called repeatedly on
    /// the same tag. Defaults to `false`.
    pub cache_tag_values: bool,

    /// Deepest nesting of compounds and lists accepted, counting the root
    /// compound as 1. Going deeper is a format error. Defaults to
    /// [`MAX_DEPTH`].
    ///
    /// Trees returned by [`NbtReader::read_as_tag`] are dropped, compared and
    /// written recursively, so raising this also raises how much stack they
    /// need.
    pub max_depth: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            skip_end_tags: true,
            cache_tag_values: false,
            max_depth: MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    BeforeStart,
    AtCompoundBeginning,
    InCompound,
    AtCompoundEnd,
    AtListBeginning,
    InList,
    AtStreamEnd,
    Error(Error),
}

/// A container the reader is currently inside.
#[derive(Debug, Clone)]
struct Frame {
    name: Option<String>,
    tag_type: TagType,
    list_type: TagType,
    length: i32,
    // Index of the current element for lists, -1 before the first.
    index: i32,
}

/// Half-built container during [`NbtReader::read_as_tag`].
struct Open {
    depth: usize,
    name: Option<String>,
    value: Value,
}

/// Reads NBT from any [`Read`] one tag at a time, never holding more than the
/// current tag in memory.
///
/// The reader starts before the root tag. Each call to
/// [`read_to_following`](NbtReader::read_to_following) moves it to the next
/// tag in document order, going into compounds and lists as it meets them.
/// Information about the tag the reader is on is available through methods
/// like [`tag_name`](NbtReader::tag_name), [`tag_type`](NbtReader::tag_type)
/// and [`depth`](NbtReader::depth), and its value through
/// [`read_value`](NbtReader::read_value).
///
/// Values that are never read are stepped over when the reader moves on.
/// With [`NbtReader::new`] they are read and thrown away. With
/// [`NbtReader::new_seekable`] they are jumped over with a seek instead,
/// which is much faster for large arrays.
///
/// # Errors
///
/// Once the reader finds the input to be malformed or truncated, or the
/// underlying reader fails, it stays in an error state. Every later
/// operation fails with [`ErrorKind::InvalidState`](crate::error::ErrorKind)
/// without touching the input. Calling an operation that makes no sense at
/// the current position fails with [`ErrorKind::Usage`](crate::error::ErrorKind)
/// and leaves the reader usable.
///
/// # Example
///
/// Print every tag in a gzipped file:
///
/// ```no_run
/// use flate2::read::GzDecoder;
/// use nbtreader::NbtReader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = std::fs::File::open("level.dat")?;
/// let mut reader = NbtReader::new(GzDecoder::new(file));
/// while reader.read_to_following()? {
///     println!("{:#}", reader);
/// }
/// # Ok(())
/// # }
/// ```
pub struct NbtReader<R> {
    input: Input<R>,
    options: ReaderOptions,
    state: State,
    frames: Vec<Frame>,

    tag_type: TagType,
    list_type: TagType,
    tag_name: Option<String>,
    tag_length: i32,
    tag_start_offset: u64,
    at_value: bool,
    value_cache: Option<Value>,

    tags_read: u64,
    root_name: Option<String>,
}

impl<R: Read> NbtReader<R> {
    /// Create a reader over a plain [`Read`]. Skipped values are read and
    /// discarded.
    pub fn new(reader: R) -> Self {
        Self::from_input(Input::new(reader))
    }

    fn from_input(input: Input<R>) -> Self {
        Self {
            input,
            options: ReaderOptions::default(),
            state: State::BeforeStart,
            frames: Vec::new(),
            tag_type: TagType::Unknown,
            list_type: TagType::Unknown,
            tag_name: None,
            tag_length: 0,
            tag_start_offset: 0,
            at_value: false,
            value_cache: None,
            tags_read: 0,
            root_name: None,
        }
    }

    /// Replace the reader's options.
    pub fn with_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn set_skip_end_tags(&mut self, skip: bool) {
        self.options.skip_end_tags = skip;
    }

    pub fn set_cache_tag_values(&mut self, cache: bool) {
        self.options.cache_tag_values = cache;
        if !cache {
            self.value_cache = None;
        }
    }

    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Whether skipped values are jumped over with seeks.
    pub fn is_seekable(&self) -> bool {
        self.input.can_seek()
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.input.get_ref()
    }

    /// Gets a mutable reference to the underlying reader. Reading from it
    /// directly will confuse the NBT reader.
    pub fn get_mut(&mut self) -> &mut R {
        self.input.get_mut()
    }

    /// Consumes this reader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.input.into_inner()
    }

    fn check_state(&self) -> Result<()> {
        match &self.state {
            State::Error(e) => Err(Error::invalid_state(e)),
            _ => Ok(()),
        }
    }

    /// Run an operation that touches the input, entering the error state if
    /// it fails in a way that leaves the position unknown.
    fn guarded<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = op(self);
        if let Err(e) = &result {
            if e.is_fatal() {
                debug!(
                    "nbt reader failed at byte {} after {} tags: {}",
                    self.input.position(),
                    self.tags_read,
                    e
                );
                self.state = State::Error(e.clone());
            }
        }
        result
    }

    /// Move to the next tag in document order, entering compounds and lists.
    /// Returns `false` once the root compound has been closed.
    pub fn read_to_following(&mut self) -> Result<bool> {
        self.check_state()?;
        self.guarded(Self::step)
    }

    /// Move forward in document order, at any depth, until a tag called
    /// `name`. Returns `false` if the stream ends first.
    pub fn read_to_following_named(&mut self, name: &str) -> Result<bool> {
        while self.read_to_following()? {
            if self.tag_name.as_deref() == Some(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Move to the next tag at the current depth, skipping over anything
    /// inside the current tag. Returns `false` if the enclosing container
    /// ends first.
    pub fn read_to_next_sibling(&mut self) -> Result<bool> {
        self.check_state()?;
        if self.state == State::AtStreamEnd {
            return Ok(false);
        }

        let start = self.depth();
        while self.read_to_following()? {
            let depth = self.depth();
            if depth < start {
                return Ok(false);
            }
            if depth == start {
                // An End tag at this depth closes our parent.
                return Ok(self.tag_type != TagType::End);
            }
        }
        Ok(false)
    }

    /// Move through siblings until one called `name`.
    pub fn read_to_next_sibling_named(&mut self, name: &str) -> Result<bool> {
        while self.read_to_next_sibling()? {
            if self.tag_name.as_deref() == Some(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Search inside the current tag for a descendant called `name`.
    ///
    /// When the search fails the reader is left on the first tag that is not
    /// a descendant, ie the tag after the current one's subtree, rather than
    /// going back.
    pub fn read_to_descendant(&mut self, name: &str) -> Result<bool> {
        self.check_state()?;
        if self.state == State::AtStreamEnd {
            return Ok(false);
        }

        let start = self.depth();
        while self.read_to_following()? {
            if self.depth() <= start {
                return Ok(false);
            }
            if self.tag_name.as_deref() == Some(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Skip the current tag and everything after it at the same depth or
    /// deeper, stopping on the first tag that is shallower. Returns how many
    /// tags were skipped.
    pub fn skip(&mut self) -> Result<usize> {
        self.check_state()?;
        if self.state == State::AtStreamEnd {
            return Ok(0);
        }

        let start = self.depth();
        let mut skipped = 0;
        while self.read_to_following()? && self.depth() >= start {
            skipped += 1;
        }
        trace!("skipped {} tags below depth {}", skipped, start);
        Ok(skipped)
    }

    /// Read the value of the current tag. Only scalars, strings and arrays
    /// have values.
    ///
    /// A value can only be read once unless
    /// [`cache_tag_values`](ReaderOptions::cache_tag_values) is on.
    pub fn read_value(&mut self) -> Result<Value> {
        self.check_state()?;
        if self.state == State::AtStreamEnd {
            return Err(Error::eof());
        }

        if !self.at_value {
            if self.options.cache_tag_values {
                if let Some(v) = &self.value_cache {
                    return Ok(v.clone());
                }
            }
            return Err(Error::usage(format!(
                "no value to read at {}",
                self.tag_type
            )));
        }

        let value = self.guarded(|r| r.input_value(r.tag_type, r.tag_length))?;
        self.at_value = false;
        if self.options.cache_tag_values {
            self.value_cache = Some(value.clone());
        }
        Ok(value)
    }

    /// Read the value of the current tag as `T`, widening numbers where
    /// needed. See [`Primitive`] for what converts to what.
    ///
    /// ```
    /// # use nbtreader::{Compound, NbtReader, Tag};
    /// # fn main() -> nbtreader::error::Result<()> {
    /// let root = Compound::new().with("count", 3i8)?;
    /// let bytes = nbtreader::to_bytes(&Tag::named("", root))?;
    ///
    /// let mut reader = NbtReader::new(bytes.as_slice());
    /// reader.read_to_following_named("count")?;
    /// let count: f64 = reader.read_value_as()?;
    /// assert_eq!(count, 3.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn read_value_as<T: Primitive>(&mut self) -> Result<T> {
        self.check_state()?;
        if self.tag_type.is_value() && !can_coerce(self.tag_type, T::TAG) {
            return Err(Error::usage(format!(
                "cannot read {} as {}",
                self.tag_type,
                T::TAG
            )));
        }
        coerce(self.read_value()?)
    }

    /// Read every element of the list the reader is on, as `T`.
    ///
    /// The reader must be on the list tag itself, before any of its elements.
    /// Afterwards it is on the last element, so the next move leaves the list.
    pub fn read_list_as_array<T: Primitive>(&mut self) -> Result<Vec<T>> {
        self.check_state()?;
        match self.state {
            State::AtStreamEnd => return Err(Error::eof()),
            State::AtListBeginning => {}
            _ => return Err(Error::usage("reader is not at the start of a list")),
        }

        if self.tag_length > 0 && !can_coerce(self.list_type, T::TAG) {
            return Err(Error::usage(format!(
                "cannot read list of {} as {}",
                self.list_type,
                T::TAG
            )));
        }

        self.guarded(Self::list_elements::<T>)
    }

    fn list_elements<T: Primitive>(&mut self) -> Result<Vec<T>> {
        let element_type = self.list_type;
        let len = self.tag_length;
        self.go_down()?;
        self.state = State::InList;

        self.tag_type = element_type;
        self.tag_name = None;
        self.list_type = TagType::Unknown;
        self.tag_length = 0;
        self.at_value = false;
        self.value_cache = None;

        let mut out = Vec::with_capacity((len as usize).min(4096));
        if element_type == TagType::Byte {
            self.tag_start_offset = self.input.position();
            let bytes = self.input.consume_bytes(len as usize)?;
            for b in bytes {
                out.push(coerce(Value::Byte(b))?);
            }
            self.set_list_index(len - 1);
        } else {
            for i in 0..len {
                self.set_list_index(i);
                self.tag_start_offset = self.input.position();
                let length = if element_type.is_array() {
                    self.array_length()?
                } else {
                    0
                };
                out.push(coerce(self.input_value(element_type, length)?)?);
            }
        }

        self.tags_read += len as u64;
        Ok(out)
    }

    /// Read the tag the reader is on, and everything inside it, into a
    /// [`Tag`]. The reader ends up on whatever follows.
    ///
    /// Before the first tag this reads the whole document. On the End tag of
    /// a compound it first moves on to the next tag.
    pub fn read_as_tag(&mut self) -> Result<Tag> {
        self.check_state()?;
        match self.state {
            State::AtStreamEnd => return Err(Error::eof()),
            State::BeforeStart | State::AtCompoundEnd => {
                if !self.read_to_following()? {
                    return Err(Error::eof());
                }
            }
            _ => {}
        }

        let container = match self.tag_type {
            TagType::Compound => Value::Compound(Compound::new()),
            TagType::List => Value::List(List::with_type(self.list_type)),
            TagType::End | TagType::Unknown => {
                return Err(Error::usage(format!("cannot read {} as a tag", self.tag_type)))
            }
            _ => {
                let name = self.tag_name.clone();
                let value = self.read_value()?;
                self.read_to_following()?;
                return Ok(Tag::new(name, value));
            }
        };

        let start = self.depth();
        let mut open = vec![Open {
            depth: start,
            name: self.tag_name.clone(),
            value: container,
        }];

        loop {
            let more = self.read_to_following()?;
            let depth = if more { self.depth() } else { 0 };

            while open.len() > 1 && open.last().map_or(false, |o| o.depth >= depth) {
                if let Some(done) = open.pop() {
                    attach(&mut open, done.name, done.value)?;
                }
            }
            if !more || depth <= start {
                break;
            }

            match self.tag_type {
                TagType::Compound => open.push(Open {
                    depth,
                    name: self.tag_name.clone(),
                    value: Value::Compound(Compound::new()),
                }),
                TagType::List => open.push(Open {
                    depth,
                    name: self.tag_name.clone(),
                    value: Value::List(List::with_type(self.list_type)),
                }),
                TagType::End => {}
                _ => {
                    let name = self.tag_name.clone();
                    let value = self.read_value()?;
                    attach(&mut open, name, value)?;
                }
            }
        }

        let root = open
            .pop()
            .ok_or_else(|| Error::format("nothing was materialized"))?;
        trace!(
            "materialized {} {:?} from depth {}",
            root.value.tag_type(),
            root.name,
            start
        );
        Ok(Tag::new(root.name, root.value))
    }

    fn step(&mut self) -> Result<bool> {
        loop {
            match self.state {
                State::BeforeStart => {
                    self.tag_start_offset = self.input.position();
                    let tag = self.input.consume_first_tag()?;
                    if tag != TagType::Compound {
                        return Err(Error::format(format!(
                            "root tag must be a compound, found {}",
                            tag
                        )));
                    }
                    self.tag_type = tag;
                    self.read_tag_header(true)?;
                    self.root_name = self.tag_name.clone();
                    return Ok(true);
                }
                State::AtCompoundBeginning => {
                    self.go_down()?;
                    self.state = State::InCompound;
                }
                State::InCompound => {
                    if self.at_value {
                        self.skip_value()?;
                    }
                    self.tag_start_offset = self.input.position();
                    self.tag_type = self.input.consume_tag()?;

                    if self.tag_type == TagType::End {
                        self.clear_tag(TagType::End);
                        self.state = State::AtCompoundEnd;
                        if self.options.skip_end_tags {
                            continue;
                        }
                        self.tags_read += 1;
                        return Ok(true);
                    }

                    self.read_tag_header(true)?;
                    return Ok(true);
                }
                State::AtListBeginning => {
                    self.go_down()?;
                    self.state = State::InList;
                }
                State::InList => {
                    if self.at_value {
                        self.skip_value()?;
                    }

                    let (element_type, index, length) = match self.frames.last_mut() {
                        Some(frame) => {
                            frame.index += 1;
                            (frame.list_type, frame.index, frame.length)
                        }
                        None => return Err(Error::format("list element outside of a list")),
                    };
                    if index >= length {
                        self.go_up();
                        continue;
                    }

                    self.tag_start_offset = self.input.position();
                    self.tag_type = element_type;
                    self.read_tag_header(false)?;
                    return Ok(true);
                }
                State::AtCompoundEnd => self.go_up(),
                State::AtStreamEnd => return Ok(false),
                State::Error(ref e) => return Err(Error::invalid_state(e)),
            }
        }
    }

    /// Read what follows the type byte of a tag: the name if it has one, then
    /// any length fields. Leaves the value itself unread.
    fn read_tag_header(&mut self, named: bool) -> Result<()> {
        self.tags_read += 1;
        self.tag_name = if named {
            Some(self.input.consume_str()?)
        } else {
            None
        };
        self.value_cache = None;
        self.tag_length = 0;
        self.at_value = false;
        self.list_type = TagType::Unknown;

        match self.tag_type {
            TagType::Byte
            | TagType::Short
            | TagType::Int
            | TagType::Long
            | TagType::Float
            | TagType::Double
            | TagType::String => self.at_value = true,
            TagType::ByteArray | TagType::IntArray => {
                self.tag_length = self.array_length()?;
                self.at_value = true;
            }
            TagType::List => {
                self.list_type = self.input.consume_tag()?;
                let len = self.input.consume_i32()?;
                if len < 0 {
                    return Err(Error::negative_length("list", len));
                }
                self.tag_length = len;
                self.state = State::AtListBeginning;
            }
            TagType::Compound => self.state = State::AtCompoundBeginning,
            TagType::End | TagType::Unknown => {
                return Err(Error::format(format!(
                    "unexpected {} where a tag was expected",
                    self.tag_type
                )))
            }
        }
        Ok(())
    }

    fn array_length(&mut self) -> Result<i32> {
        let len = self.input.consume_i32()?;
        if len < 0 {
            return Err(Error::negative_length("array", len));
        }
        Ok(len)
    }

    /// Decode a value payload whose header has already been read.
    fn input_value(&mut self, tag: TagType, length: i32) -> Result<Value> {
        Ok(match tag {
            TagType::Byte => Value::Byte(self.input.consume_i8()?),
            TagType::Short => Value::Short(self.input.consume_i16()?),
            TagType::Int => Value::Int(self.input.consume_i32()?),
            TagType::Long => Value::Long(self.input.consume_i64()?),
            TagType::Float => Value::Float(self.input.consume_f32()?),
            TagType::Double => Value::Double(self.input.consume_f64()?),
            TagType::String => Value::String(self.input.consume_str()?),
            TagType::ByteArray => Value::ByteArray(self.input.consume_bytes(length as usize)?),
            TagType::IntArray => Value::IntArray(self.input.consume_ints(length as usize)?),
            TagType::End | TagType::List | TagType::Compound | TagType::Unknown => {
                return Err(Error::usage(format!("{} does not have a value", tag)))
            }
        })
    }

    fn skip_value(&mut self) -> Result<()> {
        self.input.ignore_value(self.tag_type, self.tag_length)?;
        self.at_value = false;
        self.value_cache = None;
        Ok(())
    }
}

impl<R: Read + Seek> NbtReader<R> {
    /// Create a reader that jumps over skipped values with relative seeks
    /// instead of reading them.
    pub fn new_seekable(reader: R) -> Self {
        debug!("creating seekable nbt reader");
        Self::from_input(Input::new_seekable(reader))
    }
}

fn attach(open: &mut [Open], name: Option<String>, value: Value) -> Result<()> {
    let parent = open
        .last_mut()
        .ok_or_else(|| Error::format("tag outside of any container"))?;
    match &mut parent.value {
        Value::Compound(c) => c.insert(Tag::new(name, value))?,
        Value::List(l) => l.push(value)?,
        other => {
            return Err(Error::format(format!(
                "{} cannot hold other tags",
                other.tag_type()
            )))
        }
    }
    Ok(())
}

// Position and state inspection. None of these touch the input, so they work
// in any state, including the error state.
impl<R> NbtReader<R> {
    fn go_down(&mut self) -> Result<()> {
        if self.frames.len() >= self.options.max_depth {
            return Err(Error::format(format!(
                "{} nested deeper than {} levels",
                self.tag_type, self.options.max_depth
            )));
        }
        self.frames.push(Frame {
            name: self.tag_name.clone(),
            tag_type: self.tag_type,
            list_type: self.list_type,
            length: self.tag_length,
            index: -1,
        });
        Ok(())
    }

    fn go_up(&mut self) {
        self.frames.pop();
        self.state = match self.frames.last().map(|f| f.tag_type) {
            Some(TagType::List) => State::InList,
            Some(_) => State::InCompound,
            None => {
                self.clear_tag(TagType::Unknown);
                State::AtStreamEnd
            }
        };
    }

    fn clear_tag(&mut self, tag_type: TagType) {
        self.tag_type = tag_type;
        self.tag_name = None;
        self.list_type = TagType::Unknown;
        self.tag_length = 0;
        self.at_value = false;
        self.value_cache = None;
    }

    fn set_list_index(&mut self, index: i32) {
        if let Some(frame) = self.frames.last_mut() {
            frame.index = index;
        }
    }

    fn parent(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Name of the current tag. `None` for list elements, End tags and
    /// outside the document.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag_name.as_deref()
    }

    pub fn has_name(&self) -> bool {
        self.tag_name.is_some()
    }

    /// Type of the current tag, `TagType::Unknown` before the first tag and
    /// after the last.
    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    /// Element type of the current tag if it is a list, otherwise
    /// `TagType::Unknown`.
    pub fn list_type(&self) -> TagType {
        self.list_type
    }

    /// Byte offset of the start of the current tag, counted from where the
    /// reader started.
    pub fn tag_start_offset(&self) -> u64 {
        self.tag_start_offset
    }

    /// Number of elements of the current list or array. Zero for other tags.
    pub fn tag_length(&self) -> usize {
        self.tag_length as usize
    }

    pub fn has_length(&self) -> bool {
        matches!(
            self.tag_type,
            TagType::List | TagType::ByteArray | TagType::IntArray
        )
    }

    /// Whether the current tag is of a type that carries a value.
    pub fn has_value(&self) -> bool {
        self.tag_type.is_value()
    }

    pub fn is_list(&self) -> bool {
        self.tag_type == TagType::List
    }

    pub fn is_compound(&self) -> bool {
        self.tag_type == TagType::Compound
    }

    pub fn is_list_element(&self) -> bool {
        self.parent_tag_type() == TagType::List
    }

    /// Depth of the current tag. The root compound is at depth 1, its
    /// children at 2 and so on. Zero before the first tag and after the
    /// last.
    pub fn depth(&self) -> usize {
        match self.state {
            State::BeforeStart | State::AtStreamEnd => 0,
            _ => self.frames.len() + 1,
        }
    }

    /// Name of the container the current tag is in.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent().and_then(|f| f.name.as_deref())
    }

    /// Type of the container the current tag is in, `TagType::Unknown` for
    /// the root.
    pub fn parent_tag_type(&self) -> TagType {
        self.parent().map_or(TagType::Unknown, |f| f.tag_type)
    }

    /// Length of the list the current tag is in. Zero inside a compound.
    pub fn parent_tag_length(&self) -> usize {
        self.parent().map_or(0, |f| f.length as usize)
    }

    /// Position of the current tag in its list. Zero outside lists.
    pub fn list_index(&self) -> usize {
        match self.parent() {
            Some(f) if f.tag_type == TagType::List => f.index.max(0) as usize,
            _ => 0,
        }
    }

    /// Number of tags read so far, including skipped ones.
    pub fn tags_read(&self) -> u64 {
        self.tags_read
    }

    /// Name of the root compound, once it has been read.
    pub fn root_name(&self) -> Option<&str> {
        self.root_name.as_deref()
    }

    pub fn is_at_stream_end(&self) -> bool {
        self.state == State::AtStreamEnd
    }

    pub fn is_in_error_state(&self) -> bool {
        matches!(self.state, State::Error(_))
    }

    /// The error that put the reader into the error state.
    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            State::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Describes the current tag, eg `TAG_List("Pos"): 3 entries of TAG_Double`.
/// The alternate form `{:#}` indents by depth.
impl<R> Display for NbtReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::BeforeStart => return f.write_str("<before start>"),
            State::AtStreamEnd => return f.write_str("<end of stream>"),
            State::Error(e) => return write!(f, "<error: {}>", e),
            _ => {}
        }

        if f.alternate() {
            for _ in 1..self.depth() {
                f.write_str("    ")?;
            }
        }

        write!(f, "{}", self.tag_type)?;
        if let Some(name) = &self.tag_name {
            write!(f, "({:?})", name)?;
        }
        match self.tag_type {
            TagType::List => write!(f, ": {} entries of {}", self.tag_length, self.list_type),
            TagType::ByteArray => write!(f, ": [{} bytes]", self.tag_length),
            TagType::IntArray => write!(f, ": [{} ints]", self.tag_length),
            _ => Ok(()),
        }
    }
}
