use crate::cursor::Cursor;
use std::cmp::Ordering;
use tracing::debug;

/// Cursor that yields its upstream in comparator order
///
/// The whole upstream is pulled into a buffer on the first validity check after
/// construction or rewind, then sorted stably: elements that compare equal keep
/// their upstream order. An infinite upstream never finishes materializing, so
/// bound it with `limit` first.
pub struct Sorted<C: Cursor, F> {
    upstream: C,
    comparator: F,
    buffer: Vec<C::Item>,
    initialized: bool,
    position: usize,
}

impl<C: Cursor, F> Sorted<C, F>
where
    F: FnMut(&C::Item, &C::Item) -> Ordering,
{
    pub fn new(upstream: C, comparator: F) -> Self {
        Sorted {
            upstream,
            comparator,
            buffer: Vec::new(),
            initialized: false,
            position: 0,
        }
    }

    fn materialize(&mut self) -> Result<(), C::Error> {
        if self.initialized {
            return Ok(());
        }

        self.buffer.clear();
        while self.upstream.valid()? {
            if let Some(item) = self.upstream.current()? {
                self.buffer.push(item);
            }
            self.upstream.advance()?;
        }
        self.buffer.sort_by(&mut self.comparator);
        self.initialized = true;
        debug!(elements = self.buffer.len(), "materialized sorted buffer");
        Ok(())
    }
}

impl<C, F> Cursor for Sorted<C, F>
where
    C: Cursor,
    C::Item: Clone,
    F: FnMut(&C::Item, &C::Item) -> Ordering,
{
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.buffer.clear();
        self.initialized = false;
        self.position = 0;
        self.upstream.rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        self.materialize()?;
        Ok(self.position < self.buffer.len())
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        self.materialize()?;
        Ok(self.buffer.get(self.position).cloned())
    }

    fn key(&self) -> usize {
        self.position
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if self.valid()? {
            self.position += 1;
        }
        Ok(())
    }

    fn exact_len(&self) -> Option<usize> {
        if self.initialized {
            Some(self.buffer.len())
        } else {
            self.upstream.exact_len()
        }
    }
}

pub trait SortedExt: Cursor + Sized {
    /// Sort with a caller-provided comparator
    fn sorted_by<F>(self, comparator: F) -> Sorted<Self, F>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        Sorted::new(self, comparator)
    }

    /// Sort by the natural order of the elements
    fn sorted(self) -> Sorted<Self, fn(&Self::Item, &Self::Item) -> Ordering>
    where
        Self::Item: Ord,
    {
        Sorted::new(self, <Self::Item as Ord>::cmp)
    }
}

impl<C: Cursor> SortedExt for C {}
