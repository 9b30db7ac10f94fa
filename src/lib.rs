//! # memoiter
//!
//! memoiter lets any number of independent consumers walk the same
//! single-pass sequence while every element is produced at most once.
//!
//! ## Core Features
//!
//! - **Lazy, exactly-once evaluation**: elements are pulled from the source only when a cursor first reaches them
//! - **Independent cursors**: each consumer advances at its own pace over a shared, append-only cache
//! - **Change detection**: sources that notice mutation (see [`TrackedVec`]) reset the cache and invalidate stale cursors
//! - **Read-only collection facade**: indexed access, counting, search and copy built on the cursor protocol
//!
//! ## Quick Start
//!
//! ```rust
//! use memoiter::MemoizeExt;
//!
//! let squares = (1..=4).map(|i| i * i).memoize();
//!
//! let mut a = squares.cursor();
//! let mut b = squares.cursor();
//! assert!(a.advance().unwrap());
//! assert!(b.advance().unwrap());
//! assert_eq!(a.current().unwrap(), b.current().unwrap());
//!
//! assert_eq!(squares.to_vec().unwrap(), vec![1, 4, 9, 16]);
//! assert_eq!(squares.index_of(&9).unwrap(), Some(2));
//! ```

mod builder;
mod common;
mod config;
mod error;
mod ext;
mod seq;
mod source;

#[cfg(test)]
mod testing;

use std::sync::{Arc, RwLock};

pub use builder::MemoSeqBuilder;
pub use config::MemoConfig;
pub use error::MemoError;
pub use ext::{MemoizeExt, memoize};
pub use seq::{Cursor, CursorState, MemoSeq};
pub use source::{FnSource, IterHandle, OnceSource, Source, SourceError, SourceHandle, TrackedIter, TrackedVec};

/// Result type alias for memoiter operations.
pub type Result<T> = std::result::Result<T, MemoError>;

/// Thread-safe shared lock wrapper using Arc<RwLock<T>>.
pub(crate) type ShareLock<T> = Arc<RwLock<T>>;
