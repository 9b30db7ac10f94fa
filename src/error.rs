//! Error types for memoiter.
//!
//! All errors are represented by the `MemoError` enum. Running off the end
//! of a sequence is not one of them: exhaustion is reported as `Ok(false)`
//! by [`Cursor::advance`](crate::Cursor::advance) and `None` by the iterator
//! adapters.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for all memoiter operations.
#[derive(Deserialize, Serialize, Error, Debug, Clone, PartialEq)]
pub enum MemoError {
    /// The cursor was issued before the cache reset after a source change.
    #[error("cursor {cursor} was invalidated because the source changed during iteration")]
    Invalidated {
        cursor: u64,
    },

    /// The source reported a change while the cache was pulling from it.
    #[error("{0}")]
    ConcurrentModification(String),

    /// `current` was read outside a valid position.
    #[error("{0}")]
    InvalidAccess(String),

    /// Indexed access past the end of the sequence.
    #[error("index {index} is out of range for a sequence of length {len}")]
    OutOfRange {
        index: usize,
        len: usize,
    },

    /// The operation is not offered by a read-only memoized sequence.
    #[error("operation not supported: {0}")]
    Unsupported(String),

    /// Invalid argument passed to a facade operation.
    #[error("{0}")]
    Argument(String),

    /// The destination buffer could not hold the whole sequence.
    /// The first `written` cells past the offset hold valid data.
    #[error("destination has room for {capacity} elements, the sequence is longer ({written} written)")]
    Capacity {
        written: usize,
        capacity: usize,
    },

    /// Configuration parsing or validation errors.
    #[error("{0}")]
    Config(String),

    /// I/O operation errors.
    #[error("{0}")]
    IoError(String),
}

impl MemoError {
    /// Whether this error means the cursor that returned it can never advance again.
    pub fn is_invalidation(&self) -> bool {
        matches!(self, MemoError::Invalidated { .. } | MemoError::ConcurrentModification(_))
    }
}

impl From<MemoError> for String {
    fn from(val: MemoError) -> Self {
        val.to_string()
    }
}

impl From<std::io::Error> for MemoError {
    fn from(error: std::io::Error) -> Self {
        MemoError::IoError(error.to_string())
    }
}

impl From<MemoError> for std::io::Error {
    fn from(val: MemoError) -> Self {
        #[allow(clippy::io_other_error)]
        std::io::Error::new(ErrorKind::Other, val.to_string())
    }
}

impl From<toml::de::Error> for MemoError {
    fn from(error: toml::de::Error) -> Self {
        MemoError::Config(error.to_string())
    }
}
