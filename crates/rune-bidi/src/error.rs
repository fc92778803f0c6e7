//! Error types for level resolution, line slicing and index queries.

use thiserror::Error;

/// Result type for bidi operations.
pub type Result<T> = std::result::Result<T, BidiError>;

/// Coarse classification of a [`BidiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad range, length mismatch or malformed level array.
    InvalidArgument,
    /// Explicit embedding nesting exceeded the maximum depth.
    ResourceExhausted,
    /// The operation needs content and the structure is empty.
    Unsupported,
}

/// Errors that can occur while resolving or querying bidi data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidiError {
    /// A per-character array does not match the text length.
    #[error("level array has {actual} entries, text has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A seed level is outside `[paragraph level, MAX_DEPTH]`.
    #[error("seed level {level} at index {index} is outside {min}..={max}")]
    InvalidLevel {
        index: usize,
        level: u8,
        min: u8,
        max: u8,
    },

    /// A `[start, limit)` range is reversed or exceeds the length.
    #[error("invalid range {start}..{limit} for length {len}")]
    InvalidRange {
        start: usize,
        limit: usize,
        len: usize,
    },

    /// A line range spans more than one paragraph.
    #[error("line {start}..{limit} crosses a paragraph boundary")]
    CrossesParagraph { start: usize, limit: usize },

    /// A visual or logical index is past the end.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An explicit embedding would nest deeper than allowed.
    #[error("explicit embedding at index {index} exceeds maximum depth {max}")]
    DepthExceeded { index: usize, max: u8 },

    /// The operation presupposes content the structure does not have.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl BidiError {
    /// Coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BidiError::LengthMismatch { .. }
            | BidiError::InvalidLevel { .. }
            | BidiError::InvalidRange { .. }
            | BidiError::CrossesParagraph { .. }
            | BidiError::IndexOutOfRange { .. } => ErrorKind::InvalidArgument,
            BidiError::DepthExceeded { .. } => ErrorKind::ResourceExhausted,
            BidiError::Unsupported(_) => ErrorKind::Unsupported,
        }
    }
}
