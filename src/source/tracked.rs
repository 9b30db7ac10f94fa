//! Mutable vector with change detection.

use std::sync::{Arc, RwLock};

use crate::{
    ShareLock,
    common::{read, write},
};

use super::{Source, SourceError, SourceHandle};

#[derive(Debug)]
struct Versioned<T> {
    items: Vec<T>,
    version: u64,
}

/// Shared, growable vector whose passes detect mutation.
///
/// Clones share the same storage. Every mutation bumps a version number;
/// a [`TrackedIter`] remembers the version it was opened at and fails
/// every pull once the version has moved on, which makes a memoized
/// sequence over it reset and invalidate its cursors.
///
/// ```rust
/// use memoiter::{MemoError, TrackedVec, memoize};
///
/// let list = TrackedVec::from(vec![1, 2, 3]);
/// let seq = memoize(list.clone());
/// let mut cursor = seq.cursor();
///
/// list.push(4);
/// assert!(matches!(cursor.advance(), Err(MemoError::ConcurrentModification(_))));
/// ```
#[derive(Debug)]
pub struct TrackedVec<T> {
    inner: ShareLock<Versioned<T>>,
}

impl<T> Clone for TrackedVec<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for TrackedVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for TrackedVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Versioned {
                items,
                version: 0,
            })),
        }
    }
}

impl<T> TrackedVec<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    pub fn len(&self) -> usize {
        read(&self.inner).items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current version; starts at 0 and grows by one per mutation.
    pub fn version(&self) -> u64 {
        read(&self.inner).version
    }

    pub fn push(
        &self,
        value: T,
    ) {
        self.mutate(|items| items.push(value));
    }

    /// Insert at `index`, shifting later elements. Returns `false` if `index > len`.
    pub fn insert(
        &self,
        index: usize,
        value: T,
    ) -> bool {
        let mut inner = write(&self.inner);
        if index > inner.items.len() {
            return false;
        }
        inner.items.insert(index, value);
        inner.version += 1;
        true
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(
        &self,
        index: usize,
        value: T,
    ) -> Option<T> {
        let mut inner = write(&self.inner);
        let slot = inner.items.get_mut(index)?;
        let old = std::mem::replace(slot, value);
        inner.version += 1;
        Some(old)
    }

    pub fn remove(
        &self,
        index: usize,
    ) -> Option<T> {
        let mut inner = write(&self.inner);
        if index >= inner.items.len() {
            return None;
        }
        let old = inner.items.remove(index);
        inner.version += 1;
        Some(old)
    }

    pub fn clear(&self) {
        self.mutate(Vec::clear);
    }

    fn mutate(
        &self,
        f: impl FnOnce(&mut Vec<T>),
    ) {
        let mut inner = write(&self.inner);
        f(&mut inner.items);
        inner.version += 1;
    }
}

impl<T: Clone> TrackedVec<T> {
    pub fn snapshot(&self) -> Vec<T> {
        read(&self.inner).items.clone()
    }
}

impl<T: Clone> Source for TrackedVec<T> {
    type Item = T;
    type Handle = TrackedIter<T>;

    fn open(&mut self) -> Self::Handle {
        TrackedIter {
            inner: self.inner.clone(),
            index: 0,
            version: self.version(),
        }
    }

    fn known_len(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// One pass over a [`TrackedVec`], pinned to the version it was opened at.
#[derive(Debug)]
pub struct TrackedIter<T> {
    inner: ShareLock<Versioned<T>>,
    index: usize,
    version: u64,
}

impl<T: Clone> SourceHandle for TrackedIter<T> {
    type Item = T;

    fn pull(&mut self) -> Result<Option<T>, SourceError> {
        let inner = read(&self.inner);
        if inner.version != self.version {
            return Err(SourceError::ConcurrentModification {
                expected: self.version,
                found: inner.version,
            });
        }

        let item = inner.items.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}
