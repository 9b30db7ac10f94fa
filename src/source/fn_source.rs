use super::{IterHandle, Source};

/// Re-openable source backed by a closure.
///
/// Every call to `open` invokes the closure, so a generator-style closure
/// restarts its sequence from scratch after an invalidation.
///
/// ```rust
/// use memoiter::{FnSource, memoize};
///
/// let seq = memoize(FnSource::new(|| (1..=3).map(|i| i * 10)));
/// assert_eq!(seq.get(2).unwrap(), 30);
/// ```
#[derive(Clone)]
pub struct FnSource<F> {
    open: F,
}

impl<F> FnSource<F> {
    pub fn new(open: F) -> Self {
        Self {
            open,
        }
    }
}

impl<F, I> Source for FnSource<F>
where
    F: FnMut() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Handle = IterHandle<I::IntoIter>;

    fn open(&mut self) -> Self::Handle {
        IterHandle::new((self.open)().into_iter())
    }
}
