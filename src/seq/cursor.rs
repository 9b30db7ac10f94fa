use std::{fmt, sync::Arc};

use tracing::debug;

use crate::{MemoError, Result, common::CursorToken, source::Source};

use super::cache::SharedCache;

/// Lifecycle of a [`Cursor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CursorState {
    /// Created, not advanced yet.
    #[default]
    Fresh,
    /// Positioned on an element.
    Advancing,
    /// Moved past the last element.
    Exhausted,
    /// The source changed under the cursor; it can never advance again.
    Invalidated,
}

/// Forward-only read position into a memoized sequence.
///
/// Cursors are created by [`MemoSeq::cursor`](crate::MemoSeq::cursor).
/// Positions already realized by any cursor are served from the shared
/// cache; moving past them pulls exactly one element from the source.
///
/// A cursor is also an [`Iterator`] over `Result<T>`: it yields each
/// element, ends with `None`, and reports an invalidation error once
/// before ending.
pub struct Cursor<S: Source> {
    cache: SharedCache<S>,
    token: Arc<CursorToken>,
    position: Option<usize>,
    current: Option<S::Item>,
    state: CursorState,
    error_reported: bool,
}

impl<S: Source> Cursor<S> {
    pub(crate) fn new(cache: SharedCache<S>) -> Self {
        let token = cache.register();
        Self {
            cache,
            token,
            position: None,
            current: None,
            state: CursorState::Fresh,
            error_reported: false,
        }
    }

    /// Identifier of the cursor, unique within its sequence.
    pub fn id(&self) -> u64 {
        self.token.id()
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Index of the current element.
    ///
    /// `None` before the first advance; once exhausted it equals the
    /// length of the sequence.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Value at the current position.
    pub fn current(&self) -> Result<&S::Item> {
        match self.state {
            CursorState::Advancing if self.token.is_invalidated() => Err(self.invalidated()),
            CursorState::Advancing => self.current.as_ref().ok_or_else(|| MemoError::InvalidAccess("cursor holds no current value".to_string())),
            CursorState::Fresh => Err(MemoError::InvalidAccess("cursor has not been advanced yet".to_string())),
            CursorState::Exhausted => Err(MemoError::InvalidAccess("cursor is past the end of the sequence".to_string())),
            CursorState::Invalidated => Err(self.invalidated()),
        }
    }

    /// Cursors only move forward.
    pub fn reset(&mut self) -> Result<()> {
        Err(MemoError::Unsupported("reset: cursors only move forward".to_string()))
    }

    fn invalidated(&self) -> MemoError {
        MemoError::Invalidated {
            cursor: self.token.id(),
        }
    }
}

impl<S: Source> Cursor<S>
where
    S::Item: Clone,
{
    /// Move to the next element.
    ///
    /// Returns `Ok(true)` when positioned on an element and `Ok(false)` at
    /// the end of the sequence, repeatedly. An exhausted cursor stays
    /// exhausted even if the source changes afterwards.
    pub fn advance(&mut self) -> Result<bool> {
        match self.state {
            CursorState::Exhausted => return Ok(false),
            CursorState::Invalidated => return Err(self.invalidated()),
            _ => {}
        }

        let next = self.position.map_or(0, |p| p + 1);
        match self.cache.fetch(next, &self.token) {
            Ok(Some(value)) => {
                self.position = Some(next);
                self.current = Some(value);
                self.state = CursorState::Advancing;
                Ok(true)
            }
            Ok(None) => {
                self.position = Some(next);
                self.current = None;
                self.state = CursorState::Exhausted;
                debug!("cursor::advance({}): exhausted at {}", self.token.id(), next);
                Ok(false)
            }
            Err(err) => {
                self.current = None;
                self.state = CursorState::Invalidated;
                debug!("cursor::advance({}): {}", self.token.id(), self.state.as_ref());
                Err(err)
            }
        }
    }
}

impl<S: Source> Iterator for Cursor<S>
where
    S::Item: Clone,
{
    type Item = Result<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.current.clone().map(Ok),
            Ok(false) => None,
            Err(_) if self.error_reported => None,
            Err(err) => {
                self.error_reported = true;
                Some(Err(err))
            }
        }
    }
}

impl<S: Source> fmt::Debug for Cursor<S> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Cursor").field("id", &self.token.id()).field("position", &self.position).field("state", &self.state).finish()
    }
}
