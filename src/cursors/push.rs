use crate::cursor::Cursor;
use tracing::warn;

/// Cursor over a push-style, single-pass iterator
///
/// Elements are pulled one at a time into a one-element lookahead. The wrapped
/// iterator cannot be restarted: rewinding after elements were produced only
/// resets the position counter, so a second pass continues from wherever the
/// iterator stands (usually yielding nothing). Use [`lazy`](crate::lazy::lazy) with a
/// factory when repeatable passes are needed.
pub struct PushCursor<I, T> {
    iter: I,
    head: Option<T>,
    position: usize,
    started: bool,
    finished: bool,
    counts_from_hint: bool,
}

impl<I, T, E> PushCursor<I, T>
where
    I: Iterator<Item = Result<T, E>>,
{
    pub fn new(iter: I) -> Self {
        PushCursor {
            iter,
            head: None,
            position: 0,
            started: false,
            finished: false,
            counts_from_hint: false,
        }
    }

    /// Let `exact_len` answer from the iterator's `size_hint` before the first pull
    ///
    /// Only for iterators that never yield `Err`: the hint counts failed pulls
    /// as elements, so a fallible source would report a count without surfacing
    /// its error.
    pub fn counted_by_hint(mut self) -> Self {
        self.counts_from_hint = true;
        self
    }

    /// Whether the wrapped iterator has produced at least one element
    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl<I, T, E> Cursor for PushCursor<I, T>
where
    I: Iterator<Item = Result<T, E>>,
    T: Clone,
{
    type Item = T;
    type Error = E;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        if self.started {
            warn!(
                consumed = self.position,
                "rewinding a single-pass sequence; the next pass continues where this one stopped"
            );
        }
        self.position = 0;
        Ok(())
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        if self.head.is_some() {
            return Ok(true);
        }
        if self.finished {
            return Ok(false);
        }

        match self.iter.next() {
            Some(Ok(value)) => {
                self.started = true;
                self.head = Some(value);
                Ok(true)
            }
            Some(Err(error)) => {
                self.started = true;
                Err(error)
            }
            None => {
                self.finished = true;
                Ok(false)
            }
        }
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if !self.valid()? {
            return Ok(None);
        }
        Ok(self.head.clone())
    }

    fn key(&self) -> usize {
        self.position
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if self.valid()? {
            self.head = None;
            self.position += 1;
        }
        Ok(())
    }

    fn exact_len(&self) -> Option<usize> {
        if self.started || !self.counts_from_hint {
            return None;
        }
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(lower),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn infallible<T>(items: Vec<T>) -> impl Iterator<Item = Result<T, Infallible>> {
        items.into_iter().map(Ok)
    }

    #[test]
    fn test_pulls_lazily() {
        let mut pulled = 0;
        let iter = (0..3).inspect(|_| pulled += 1).map(Ok::<_, Infallible>);
        let mut cursor = PushCursor::new(iter);

        assert!(!cursor.is_started());
        assert_eq!(cursor.current().unwrap(), Some(0));
        assert_eq!(cursor.current().unwrap(), Some(0));
        cursor.advance().unwrap();
        assert_eq!(cursor.current().unwrap(), Some(1));
        assert_eq!(cursor.key(), 1);

        drop(cursor);
        assert_eq!(pulled, 2);
    }

    #[test]
    fn test_advance_consumes_unpulled_element() {
        let mut cursor = PushCursor::new(infallible(vec!['q', 'w']));

        cursor.advance().unwrap();
        assert_eq!(cursor.current().unwrap(), Some('w'));
    }

    #[test]
    fn test_second_pass_is_empty() {
        let mut cursor = PushCursor::new(infallible(vec![1, 2]));
        while cursor.valid().unwrap() {
            cursor.advance().unwrap();
        }

        cursor.rewind().unwrap();
        assert_eq!(cursor.key(), 0);
        assert!(!cursor.valid().unwrap());
    }

    #[test]
    fn test_error_passes_through() {
        let iter = vec![Ok(1), Err("broken"), Ok(3)].into_iter();
        let mut cursor = PushCursor::new(iter);

        assert_eq!(cursor.current(), Ok(Some(1)));
        assert_eq!(cursor.advance(), Ok(()));
        assert_eq!(cursor.current(), Err("broken"));
        // the failed pull is gone, the iterator carries on
        assert_eq!(cursor.current(), Ok(Some(3)));
    }

    #[test]
    fn test_exact_len_from_size_hint() {
        let cursor = PushCursor::new(infallible(vec![1, 2, 3])).counted_by_hint();
        assert_eq!(cursor.exact_len(), Some(3));

        let filtered = PushCursor::new((0..10).filter(|n| n % 2 == 0).map(Ok::<_, Infallible>))
            .counted_by_hint();
        assert_eq!(filtered.exact_len(), None);
    }

    #[test]
    fn test_fallible_count_surfaces_error() {
        let mut cursor = PushCursor::new(vec![Ok(1), Err("broken"), Ok(3)].into_iter());
        assert_eq!(cursor.exact_len(), None);
        assert_eq!(cursor.count_all(), Err("broken"));
    }
}
