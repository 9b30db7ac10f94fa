//! Non-owning registry of issued cursors.
//!
//! The cache keeps one weak entry per cursor so that it can flag them all
//! as stale when the source changes. The registry never keeps a cursor
//! alive: a dropped cursor leaves a dead entry behind, which is pruned the
//! next time the registry grows past its threshold.

use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

use tracing::debug;

/// Liveness token shared between a cursor and the registry.
#[derive(Debug)]
pub(crate) struct CursorToken {
    id: u64,
    invalidated: AtomicBool,
}

impl CursorToken {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::Acquire)
    }

    fn invalidate(&self) {
        self.invalidated.store(true, Ordering::Release);
    }
}

#[derive(Debug)]
pub(crate) struct CursorRegistry {
    entries: Vec<Weak<CursorToken>>,
    next_id: u64,
    prune_threshold: usize,
    /// Registry size that triggers the next prune.
    prune_at: usize,
}

impl CursorRegistry {
    pub(crate) fn new(prune_threshold: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            prune_threshold: prune_threshold.max(1),
            prune_at: prune_threshold.max(1),
        }
    }

    /// Issue a token for a new cursor and keep a weak reference to it.
    pub(crate) fn register(&mut self) -> Arc<CursorToken> {
        if self.entries.len() >= self.prune_at {
            self.prune();
        }

        let token = Arc::new(CursorToken {
            id: self.next_id,
            invalidated: AtomicBool::new(false),
        });
        self.next_id += 1;
        self.entries.push(Arc::downgrade(&token));
        token
    }

    /// Flag every cursor that is still alive and forget all entries.
    /// Returns the number of cursors that were flagged.
    pub(crate) fn invalidate_all(&mut self) -> usize {
        let mut flagged = 0;
        for entry in self.entries.drain(..) {
            if let Some(token) = entry.upgrade() {
                token.invalidate();
                flagged += 1;
            }
        }
        self.prune_at = self.prune_threshold;
        flagged
    }

    /// Number of registered cursors that have not been dropped yet.
    pub(crate) fn live(&self) -> usize {
        self.entries.iter().filter(|e| e.strong_count() > 0).count()
    }

    /// Number of entries held, dead ones included.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn prune(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|e| e.strong_count() > 0);
        // live cursors stay in the list, so back off to keep registration amortized O(1)
        self.prune_at = self.prune_threshold.max(2 * self.entries.len());
        debug!("registry::prune({} -> {})", before, self.entries.len());
    }
}
