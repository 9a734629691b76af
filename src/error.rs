//! Contains the Error and Result types used by the reader and the tag tree.
use std::fmt::Display;

use crate::TagType;

/// Errors produced while reading NBT or modifying a tag tree.
///
/// Use [`Error::kind`] to tell malformed input ([`ErrorKind::Format`],
/// [`ErrorKind::UnexpectedEof`]) apart from misuse of the API
/// ([`ErrorKind::Usage`], [`ErrorKind::InvalidState`]) and from the ordinary
/// end of the data ([`ErrorKind::Eof`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The input does not follow the NBT grammar. Fatal to a reader.
    Format,

    /// There was nothing left to read. This is the natural end of the data,
    /// eg calling `read_value` after the root compound has been closed, or
    /// reading from a completely empty input.
    Eof,

    /// EOF that occurred part way through some NBT value. Fatal to a reader.
    UnexpectedEof,

    /// Any other IO error reported by the underlying reader. Fatal to a reader.
    Io(std::io::ErrorKind),

    /// The operation does not make sense at the reader's current position,
    /// or a value cannot be coerced to the requested type.
    Usage,

    /// The reader previously hit a fatal error and can no longer be used.
    InvalidState,

    /// A tag tree mutation would break one of the tree's rules.
    Invariant(Violation),
}

/// The tree rule a rejected mutation would have broken.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Violation {
    /// Compound children must be named.
    Unnamed,
    /// Compound already has a child with this name.
    DuplicateName(String),
    /// List elements must all be of the list's element type.
    TypeMismatch { expected: TagType, found: TagType },
    /// List index past the end of the list.
    IndexOutOfRange { index: usize, len: usize },
    /// Typed getter found a child of a different type.
    WrongType { expected: TagType, found: TagType },
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Clean end of data, not a malformed input.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::Eof)
    }

    /// The input is malformed, either breaking the grammar or truncated.
    pub fn is_format(&self) -> bool {
        matches!(self.kind, ErrorKind::Format | ErrorKind::UnexpectedEof)
    }

    /// The caller used the API incorrectly, including any use of a reader
    /// that is in the error state.
    pub fn is_usage(&self) -> bool {
        matches!(self.kind, ErrorKind::Usage | ErrorKind::InvalidState)
    }

    /// The error is a rejected tag tree mutation.
    pub fn violation(&self) -> Option<&Violation> {
        match &self.kind {
            ErrorKind::Invariant(v) => Some(v),
            _ => None,
        }
    }

    /// Errors that leave the position in the input unknown.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Format | ErrorKind::UnexpectedEof | ErrorKind::Eof | ErrorKind::Io(_)
        )
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Format,
        }
    }

    pub(crate) fn invalid_tag(t: u8) -> Self {
        Self::format(format!("invalid tag: {}", t))
    }

    pub(crate) fn negative_length(what: &str, len: i32) -> Self {
        Self::format(format!("negative {} length: {}", what, len))
    }

    pub(crate) fn nonunicode(d: &[u8]) -> Self {
        Self::format(format!(
            "invalid string, non-unicode: {}",
            String::from_utf8_lossy(d)
        ))
    }

    pub(crate) fn eof() -> Self {
        Self {
            msg: "EOF".into(),
            kind: ErrorKind::Eof,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".into(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Usage,
        }
    }

    pub(crate) fn invalid_state(cause: &Error) -> Self {
        Self {
            msg: format!("reader is in an error state: {}", cause),
            kind: ErrorKind::InvalidState,
        }
    }

    pub(crate) fn invariant(v: Violation) -> Self {
        Self {
            msg: v.to_string(),
            kind: ErrorKind::Invariant(v),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Unnamed => f.write_str("compound children must be named"),
            Violation::DuplicateName(name) => {
                write!(f, "compound already contains a tag named {:?}", name)
            }
            Violation::TypeMismatch { expected, found } => write!(
                f,
                "list holds {} elements, cannot add {}",
                expected, found
            ),
            Violation::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for list of length {}", index, len)
            }
            Violation::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{}", self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self {
                msg: e.to_string(),
                kind: ErrorKind::UnexpectedEof,
            },
            other => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io(other),
            },
        }
    }
}

/// A rejected insertion. Holds the item that was moved in, so the caller gets
/// it back untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertError<T> {
    error: Error,
    item: T,
}

impl<T> InsertError<T> {
    pub(crate) fn new(v: Violation, item: T) -> Self {
        Self {
            error: Error::invariant(v),
            item,
        }
    }

    /// The rule that was broken.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Take back the item that could not be inserted.
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> Display for InsertError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.error, f)
    }
}

impl<T: std::fmt::Debug> std::error::Error for InsertError<T> {}

impl<T> From<InsertError<T>> for Error {
    fn from(e: InsertError<T>) -> Self {
        e.error
    }
}
