use std::fmt;

/// Errors that can occur when inserting into a set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// The value cannot be used as a set element (it holds a list or a map)
    InadmissibleElement(String),
    /// The value is already in the set and strict duplicate mode is on
    AlreadyExists(String),
    /// An extension source that is neither set-like nor array-like
    UnsupportedSource(String),
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SetError::InadmissibleElement(kind) => {
                write!(f, "Inadmissible set element of unhashable kind: {}", kind)
            }
            SetError::AlreadyExists(value) => write!(f, "Element already exists: {}", value),
            SetError::UnsupportedSource(kind) => write!(
                f,
                "Cannot extend a set from kind {}, only lists and sets are supported",
                kind
            ),
        }
    }
}

impl std::error::Error for SetError {}
