//! The shared, append-only cache behind every cursor of a [`MemoSeq`](crate::MemoSeq).
//!
//! `CacheState` owns the source, its single open handle and the values
//! pulled so far. All extension happens in [`CacheState::extend`], under
//! the write lock of [`SharedCache`]; reads of realized positions only
//! take the read lock.

use std::sync::{Arc, RwLock};

use tracing::{trace, warn};

use crate::{
    MemoConfig, MemoError, Result, ShareLock,
    common::{CursorRegistry, CursorToken, read, write},
    source::{Source, SourceHandle},
};

pub(crate) struct CacheState<S: Source> {
    source: S,
    /// Only `None` while a replacement is being opened during invalidation.
    handle: Option<S::Handle>,
    values: Vec<S::Item>,
    registry: CursorRegistry,
    generation: u64,
}

impl<S: Source> CacheState<S> {
    fn new(
        mut source: S,
        config: &MemoConfig,
    ) -> Self {
        let handle = source.open();
        Self {
            source,
            handle: Some(handle),
            values: Vec::with_capacity(config.initial_capacity),
            registry: CursorRegistry::new(config.registry_prune_threshold),
            generation: 0,
        }
    }

    /// Pull exactly one element from the handle and append it.
    ///
    /// `Ok(None)` means the handle is exhausted; nothing is recorded, so
    /// asking again simply asks the handle again. A modification signal
    /// resets the cache before the error is returned.
    fn extend(&mut self) -> Result<Option<S::Item>>
    where
        S::Item: Clone,
    {
        let handle = self.handle.get_or_insert_with(|| self.source.open());

        match handle.pull() {
            Ok(Some(value)) => {
                trace!("cache::extend(generation={}, index={})", self.generation, self.values.len());
                self.values.push(value.clone());
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                warn!("cache::extend(generation={}): {}", self.generation, err);
                self.invalidate();
                Err(MemoError::ConcurrentModification(err.to_string()))
            }
        }
    }

    fn invalidate(&mut self) {
        self.values.clear();
        // the old handle goes before the new one is opened
        drop(self.handle.take());
        self.handle = Some(self.source.open());

        let flagged = self.registry.invalidate_all();
        self.generation += 1;
        warn!("cache::invalidate(generation={}, cursors={})", self.generation, flagged);
    }
}

impl<S: Source> Drop for CacheState<S> {
    fn drop(&mut self) {
        trace!("cache::drop(generation={}, cached={})", self.generation, self.values.len());
    }
}

/// Reference-counted handle to a [`CacheState`], shared by the sequence and its cursors.
pub(crate) struct SharedCache<S: Source> {
    state: ShareLock<CacheState<S>>,
}

impl<S: Source> Clone for SharedCache<S> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<S: Source> SharedCache<S> {
    pub(crate) fn new(
        source: S,
        config: &MemoConfig,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::new(source, config))),
        }
    }

    pub(crate) fn register(&self) -> Arc<CursorToken> {
        let token = write(&self.state).registry.register();
        trace!("cache::register({})", token.id());
        token
    }

    pub(crate) fn cached_len(&self) -> usize {
        read(&self.state).values.len()
    }

    pub(crate) fn known_len(&self) -> Option<usize> {
        read(&self.state).source.known_len()
    }

    pub(crate) fn live_cursors(&self) -> usize {
        read(&self.state).registry.live()
    }

    pub(crate) fn generation(&self) -> u64 {
        read(&self.state).generation
    }
}

impl<S: Source> SharedCache<S>
where
    S::Item: Clone,
{
    pub(crate) fn cached(
        &self,
        index: usize,
    ) -> Option<S::Item> {
        read(&self.state).values.get(index).cloned()
    }

    pub(crate) fn cached_values(&self) -> Vec<S::Item> {
        read(&self.state).values.clone()
    }

    /// Value at `index` for the cursor owning `token`, extending the cache if needed.
    ///
    /// Realized positions are served under the read lock. Otherwise the
    /// write lock is taken and the length re-checked, so racing cursors
    /// never pull the same position twice.
    pub(crate) fn fetch(
        &self,
        index: usize,
        token: &CursorToken,
    ) -> Result<Option<S::Item>> {
        {
            let state = read(&self.state);
            if token.is_invalidated() {
                return Err(MemoError::Invalidated {
                    cursor: token.id(),
                });
            }
            if let Some(value) = state.values.get(index) {
                return Ok(Some(value.clone()));
            }
        }

        let mut state = write(&self.state);
        if token.is_invalidated() {
            return Err(MemoError::Invalidated {
                cursor: token.id(),
            });
        }
        if let Some(value) = state.values.get(index) {
            return Ok(Some(value.clone()));
        }

        // cursors move one step at a time, so this only loops for callers that skip ahead
        while state.values.len() < index {
            if state.extend()?.is_none() {
                return Ok(None);
            }
        }
        state.extend()
    }
}
