//! Error and status types

use std::fmt;

use thiserror::Error;

/// Load status of a document. Sticky: the first error seen is kept until cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum Status {
    #[default]
    NoError,
    /// The file exists but could not be read
    AccessError,
    /// A section header was missing its closing bracket
    FormatError,
}

impl Status {
    pub fn is_ok(self) -> bool {
        self == Status::NoError
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NoError => write!(f, "no error"),
            Status::AccessError => write!(f, "file could not be read"),
            Status::FormatError => write!(f, "malformed section header"),
        }
    }
}

/// Rejected write operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("empty key passed to {0}")]
    EmptyKey(&'static str),
    #[error("empty section passed to {0}")]
    EmptySection(&'static str),
}

/// Result type alias for desktop entry operations
pub type Result<T> = std::result::Result<T, EntryError>;
