//! Sources of memoized sequences.
//!
//! A [`Source`] is a factory of forward-only [`SourceHandle`]s. The cache
//! opens one handle when it is created and pulls from it one element at a
//! time; it opens a fresh one only after the handle reports that the
//! underlying data changed.

mod fn_source;
mod once;
mod tracked;

use std::iter::Fuse;

use thiserror::Error;

pub use fn_source::FnSource;
pub use once::OnceSource;
pub use tracked::{TrackedIter, TrackedVec};

/// Failure signalled by a source handle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The collection behind the handle was mutated after the handle was opened.
    #[error("source was modified during iteration (opened at version {expected}, now at {found})")]
    ConcurrentModification {
        expected: u64,
        found: u64,
    },
}

/// A single forward-only pass over a source.
pub trait SourceHandle {
    type Item;

    /// Produce the next element, `Ok(None)` once the pass is over.
    fn pull(&mut self) -> Result<Option<Self::Item>, SourceError>;
}

/// Producer of an ordered sequence.
pub trait Source {
    type Item;
    type Handle: SourceHandle<Item = Self::Item>;

    /// Open a new pass from the first element.
    fn open(&mut self) -> Self::Handle;

    /// Exact number of elements, when the source knows it without iterating.
    fn known_len(&self) -> Option<usize> {
        None
    }
}

/// Adapts a plain iterator into a handle that never fails.
///
/// The iterator is fused: once it has returned `None` the handle keeps
/// reporting exhaustion.
#[derive(Debug, Clone)]
pub struct IterHandle<I> {
    iter: Fuse<I>,
}

impl<I: Iterator> IterHandle<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: iter.fuse(),
        }
    }
}

impl<I: Iterator> SourceHandle for IterHandle<I> {
    type Item = I::Item;

    fn pull(&mut self) -> Result<Option<Self::Item>, SourceError> {
        Ok(self.iter.next())
    }
}
