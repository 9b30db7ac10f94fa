use std::{iter::Flatten, option};

use super::{IterHandle, Source};

/// Source over an iterator that can only be walked once.
///
/// The first `open` hands the iterator out; any later `open` yields an
/// empty pass. Plain iterators never report modification, so the cache
/// only opens this source once in practice.
pub struct OnceSource<I> {
    iter: Option<I>,
}

impl<I> OnceSource<I> {
    pub fn new(iter: I) -> Self {
        Self {
            iter: Some(iter),
        }
    }
}

impl<I: Iterator> Source for OnceSource<I> {
    type Item = I::Item;
    type Handle = IterHandle<Flatten<option::IntoIter<I>>>;

    fn open(&mut self) -> Self::Handle {
        IterHandle::new(self.iter.take().into_iter().flatten())
    }
}
