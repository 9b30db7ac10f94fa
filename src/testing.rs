//! Test sources that record how often they were pulled.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::source::{IterHandle, Source};

/// Shared counter of elements produced by a [`CountingSource`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Pulls(Arc<AtomicUsize>);

impl Pulls {
    pub(crate) fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Re-openable source over fixed items that counts every produced element.
pub(crate) struct CountingSource<T> {
    items: Vec<T>,
    pulls: Pulls,
    known_len: bool,
}

impl<T: Clone + Send + Sync + 'static> CountingSource<T> {
    pub(crate) fn new(items: Vec<T>) -> (Self, Pulls) {
        let pulls = Pulls::default();
        let source = Self {
            items,
            pulls: pulls.clone(),
            known_len: false,
        };
        (source, pulls)
    }

    /// Same as `new`, but the source reports its length up front.
    pub(crate) fn sized(items: Vec<T>) -> (Self, Pulls) {
        let (mut source, pulls) = Self::new(items);
        source.known_len = true;
        (source, pulls)
    }
}

impl<T: Clone + Send + Sync + 'static> Source for CountingSource<T> {
    type Item = T;
    type Handle = IterHandle<Box<dyn Iterator<Item = T> + Send + Sync>>;

    fn open(&mut self) -> Self::Handle {
        let pulls = self.pulls.clone();
        let items = self.items.clone().into_iter().inspect(move |_| pulls.bump());
        IterHandle::new(Box::new(items))
    }

    fn known_len(&self) -> Option<usize> {
        self.known_len.then_some(self.items.len())
    }
}
