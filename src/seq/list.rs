//! Read-only collection operations on a [`MemoSeq`].
//!
//! Everything here is built on cursors, so each operation pulls only the
//! elements no cursor has realized yet, and stops pulling as soon as it
//! has its answer.

use crate::{MemoError, Result, source::Source};

use super::MemoSeq;

fn unsupported<T>(operation: &str) -> Result<T> {
    Err(MemoError::Unsupported(format!("{}: memoized sequences are read-only", operation)))
}

impl<S: Source> MemoSeq<S>
where
    S::Item: Clone,
{
    /// Element at `index`, realizing the sequence up to it if needed.
    ///
    /// An index past the end is only detected once the source is exhausted.
    pub fn get(
        &self,
        index: usize,
    ) -> Result<S::Item> {
        if let Some(value) = self.cache.cached(index) {
            return Ok(value);
        }

        let mut cursor = self.cursor();
        while cursor.advance()? {
            if cursor.position() == Some(index) {
                return cursor.current().cloned();
            }
        }
        Err(MemoError::OutOfRange {
            index,
            len: cursor.position().unwrap_or(0),
        })
    }

    /// Number of elements. Uses the source's known length when it has one,
    /// otherwise realizes the whole sequence.
    pub fn count(&self) -> Result<usize> {
        if let Some(len) = self.cache.known_len() {
            return Ok(len);
        }

        let mut cursor = self.cursor();
        let mut len = 0;
        while cursor.advance()? {
            len += 1;
        }
        Ok(len)
    }

    /// Copy the sequence into `buffer` starting at `offset`, returning the number of elements written.
    ///
    /// Cells before `offset` are never touched. If the sequence does not fit,
    /// the cells that do fit are written and `MemoError::Capacity` is returned.
    pub fn copy_into(
        &self,
        buffer: &mut [S::Item],
        offset: usize,
    ) -> Result<usize> {
        if offset > buffer.len() {
            return Err(MemoError::Argument(format!("offset {} is past the end of a buffer of length {}", offset, buffer.len())));
        }

        let room = &mut buffer[offset..];
        let capacity = room.len();
        let mut written = 0;
        let mut cursor = self.cursor();
        while cursor.advance()? {
            let Some(slot) = room.get_mut(written) else {
                return Err(MemoError::Capacity {
                    written,
                    capacity,
                });
            };
            *slot = cursor.current()?.clone();
            written += 1;
        }
        Ok(written)
    }

    pub fn set(
        &self,
        _index: usize,
        _value: S::Item,
    ) -> Result<()> {
        unsupported("set")
    }

    pub fn add(
        &self,
        _value: S::Item,
    ) -> Result<()> {
        unsupported("add")
    }

    pub fn insert(
        &self,
        _index: usize,
        _value: S::Item,
    ) -> Result<()> {
        unsupported("insert")
    }

    pub fn remove(
        &self,
        _value: &S::Item,
    ) -> Result<bool> {
        unsupported("remove")
    }

    pub fn remove_at(
        &self,
        _index: usize,
    ) -> Result<()> {
        unsupported("remove_at")
    }

    pub fn clear(&self) -> Result<()> {
        unsupported("clear")
    }
}

impl<S: Source> MemoSeq<S>
where
    S::Item: Clone + PartialEq,
{
    /// Position of the first element equal to `value`.
    pub fn index_of(
        &self,
        value: &S::Item,
    ) -> Result<Option<usize>> {
        let mut cursor = self.cursor();
        while cursor.advance()? {
            if cursor.current()? == value {
                return Ok(cursor.position());
            }
        }
        Ok(None)
    }

    pub fn contains(
        &self,
        value: &S::Item,
    ) -> Result<bool> {
        Ok(self.index_of(value)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use crate::{MemoError, MemoSeq, TrackedVec, testing::CountingSource};

    #[test]
    fn test_get_pulls_only_up_to_index() {
        let (source, pulls) = CountingSource::new(vec![10, 11, 12, 13, 14]);
        let seq = MemoSeq::new(source);

        assert_eq!(seq.get(2).unwrap(), 12);
        assert_eq!(pulls.get(), 3);
        assert_eq!(seq.get(0).unwrap(), 10);
        assert_eq!(seq.get(3).unwrap(), 13);
        assert_eq!(pulls.get(), 4);
    }

    #[test]
    fn test_get_out_of_range() {
        let (source, pulls) = CountingSource::new(vec![1, 2, 3]);
        let seq = MemoSeq::new(source);

        assert_eq!(
            seq.get(3),
            Err(MemoError::OutOfRange {
                index: 3,
                len: 3
            })
        );
        assert_eq!(pulls.get(), 3);
        assert!(matches!(seq.get(100), Err(MemoError::OutOfRange { .. })));
    }

    #[test]
    fn test_count_realizes_unsized_source() {
        let (source, pulls) = CountingSource::new(vec!['x', 'y', 'z']);
        let seq = MemoSeq::new(source);
        assert_eq!(seq.count().unwrap(), 3);
        assert_eq!(pulls.get(), 3);
        assert_eq!(seq.count().unwrap(), 3);
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_count_uses_known_len() {
        let (source, pulls) = CountingSource::sized(vec![1, 2, 3, 4]);
        let seq = MemoSeq::new(source);
        assert_eq!(seq.count().unwrap(), 4);
        assert_eq!(pulls.get(), 0);

        let list = TrackedVec::from(vec![1, 2]);
        assert_eq!(MemoSeq::new(list).count().unwrap(), 2);
    }

    #[test]
    fn test_contains_pulls_incrementally() {
        let (source, pulls) = CountingSource::new(vec![1, 2, 2, 3]);
        let seq = MemoSeq::new(source);

        assert!(seq.contains(&1).unwrap());
        assert_eq!(pulls.get(), 1);
        assert!(seq.contains(&2).unwrap());
        assert_eq!(pulls.get(), 2);
        assert!(seq.contains(&3).unwrap());
        assert_eq!(pulls.get(), 4);
        assert!(!seq.contains(&9).unwrap());
        assert_eq!(pulls.get(), 4);
    }

    #[test]
    fn test_index_of_finds_first_match() {
        let (source, _) = CountingSource::new(vec!["a", "b", "b", "c"]);
        let seq = MemoSeq::new(source);
        assert_eq!(seq.index_of(&"b").unwrap(), Some(1));
        assert_eq!(seq.index_of(&"c").unwrap(), Some(3));
        assert_eq!(seq.index_of(&"d").unwrap(), None);
    }

    #[test]
    fn test_copy_into_at_offset() {
        let (source, _) = CountingSource::new(vec![1, 2, 3]);
        let seq = MemoSeq::new(source);
        let mut buffer = [0; 5];

        assert_eq!(seq.copy_into(&mut buffer, 1).unwrap(), 3);
        assert_eq!(buffer, [0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_copy_into_overflow_writes_what_fits() {
        let (source, _) = CountingSource::new(vec![1, 2, 3, 4]);
        let seq = MemoSeq::new(source);
        let mut buffer = [9; 4];

        assert_eq!(
            seq.copy_into(&mut buffer, 2),
            Err(MemoError::Capacity {
                written: 2,
                capacity: 2
            })
        );
        assert_eq!(buffer, [9, 9, 1, 2]);
    }

    #[test]
    fn test_copy_into_rejects_offset_past_end() {
        let (source, pulls) = CountingSource::new(vec![1]);
        let seq = MemoSeq::new(source);
        let mut buffer = [0; 2];

        assert!(matches!(seq.copy_into(&mut buffer, 3), Err(MemoError::Argument(_))));
        assert_eq!(pulls.get(), 0);
        assert_eq!(
            seq.copy_into(&mut buffer, 2),
            Err(MemoError::Capacity {
                written: 0,
                capacity: 0,
            })
        );
    }

    #[test]
    fn test_copy_into_empty_sequence() {
        let (source, _) = CountingSource::<u8>::new(vec![]);
        let seq = MemoSeq::new(source);
        let mut buffer = [7u8; 1];
        assert_eq!(seq.copy_into(&mut buffer, 1).unwrap(), 0);
        assert_eq!(buffer, [7]);
    }

    #[test]
    fn test_mutations_are_unsupported() {
        let (source, pulls) = CountingSource::new(vec![1, 2]);
        let seq = MemoSeq::new(source);

        assert!(matches!(seq.set(0, 5), Err(MemoError::Unsupported(_))));
        assert!(matches!(seq.add(5), Err(MemoError::Unsupported(_))));
        assert!(matches!(seq.insert(0, 5), Err(MemoError::Unsupported(_))));
        assert!(matches!(seq.remove(&1), Err(MemoError::Unsupported(_))));
        assert!(matches!(seq.remove_at(0), Err(MemoError::Unsupported(_))));
        assert!(matches!(seq.clear(), Err(MemoError::Unsupported(_))));
        assert_eq!(pulls.get(), 0);
        assert_eq!(seq.to_vec().unwrap(), vec![1, 2]);
    }
}
