//! Entry points that wrap a source or an iterator into a [`MemoSeq`].

use crate::{
    MemoSeq,
    source::{OnceSource, Source},
};

/// Wrap `source` into a memoized sequence with the default configuration.
pub fn memoize<S>(source: S) -> MemoSeq<S>
where
    S: Source,
    S::Item: Clone,
{
    MemoSeq::new(source)
}

/// Memoize any iterator in place: `iter.memoize()`.
///
/// ```rust
/// use memoiter::MemoizeExt;
///
/// let lines = ["a", "b"].into_iter().memoize();
/// assert!(lines.contains(&"b").unwrap());
/// assert_eq!(lines.get(0).unwrap(), "a");
/// ```
pub trait MemoizeExt: Iterator + Sized {
    fn memoize(self) -> MemoSeq<OnceSource<Self>>
    where
        Self::Item: Clone,
    {
        MemoSeq::new(OnceSource::new(self))
    }
}

impl<I: Iterator> MemoizeExt for I {}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    #[test]
    fn test_memoize_iterator_evaluates_once() {
        let evaluated = Arc::new(AtomicUsize::new(0));
        let counter = evaluated.clone();
        let seq = (0..3)
            .map(move |i| {
                counter.fetch_add(1, Ordering::SeqCst);
                i * i
            })
            .memoize();

        assert_eq!(seq.to_vec().unwrap(), vec![0, 1, 4]);
        assert_eq!(seq.to_vec().unwrap(), vec![0, 1, 4]);
        assert_eq!(evaluated.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_memoize_without_consumption_evaluates_nothing() {
        let evaluated = Arc::new(AtomicUsize::new(0));
        let counter = evaluated.clone();
        let seq = (0..3)
            .map(move |i| {
                counter.fetch_add(1, Ordering::SeqCst);
                i
            })
            .memoize();

        let _mapped = seq.cursor().map(|r| r.map(|i| i * 2));
        assert_eq!(evaluated.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_memoize_source() {
        let seq = memoize(crate::TrackedVec::from(vec![1, 2]));
        assert_eq!(seq.count().unwrap(), 2);
        assert_eq!(seq.cached_len(), 0);
    }
}
