//! Memoized sequences.
//!
//! A [`MemoSeq`] wraps a [`Source`] and hands out [`Cursor`]s over it.
//! Every cursor reads from one shared cache; the source is pulled only
//! when some cursor moves past the realized prefix, so each element is
//! produced at most once however many cursors walk the sequence.
//!
//! When the source reports that it changed mid-iteration, the cache is
//! cleared, a fresh pass over the source is opened, and every cursor
//! issued before that point fails from its next advance on.

mod cache;
mod cursor;
mod list;

use crate::{MemoConfig, Result, source::Source};

use cache::SharedCache;
pub use cursor::{Cursor, CursorState};

/// Lazily memoized view of a source, shared by any number of cursors.
///
/// Cloning a `MemoSeq` is cheap and shares the cache.
pub struct MemoSeq<S: Source> {
    cache: SharedCache<S>,
}

impl<S: Source> Clone for MemoSeq<S> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
        }
    }
}

impl<S: Source> MemoSeq<S> {
    /// Wrap `source` with the default configuration.
    ///
    /// The first pass over the source is opened right away, so sources with
    /// change detection notice mutations made from this point on.
    pub fn new(source: S) -> Self {
        Self::with_config(source, &MemoConfig::default())
    }

    pub fn with_config(
        source: S,
        config: &MemoConfig,
    ) -> Self {
        Self {
            cache: SharedCache::new(source, config),
        }
    }

    /// Create an independent cursor positioned before the first element.
    pub fn cursor(&self) -> Cursor<S> {
        Cursor::new(self.cache.clone())
    }

    /// Number of elements realized so far.
    pub fn cached_len(&self) -> usize {
        self.cache.cached_len()
    }

    /// Number of registered cursors not yet invalidated or dropped.
    ///
    /// A reset forgets every cursor issued before it, so stale cursors
    /// that are still alive are not counted.
    pub fn live_cursors(&self) -> usize {
        self.cache.live_cursors()
    }

    /// Number of times the cache was reset after a source change.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }
}

impl<S: Source> MemoSeq<S>
where
    S::Item: Clone,
{
    /// Snapshot of the realized prefix; never pulls from the source.
    pub fn cached_values(&self) -> Vec<S::Item> {
        self.cache.cached_values()
    }

    /// Realize the whole sequence into a `Vec`.
    pub fn to_vec(&self) -> Result<Vec<S::Item>> {
        self.cursor().collect()
    }
}

impl<'a, S: Source> IntoIterator for &'a MemoSeq<S>
where
    S::Item: Clone,
{
    type Item = Result<S::Item>;
    type IntoIter = Cursor<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}
