use crate::cursor::Cursor;
use std::convert::Infallible;

/// Cursor over an owned snapshot of a collection
///
/// The elements are copied in at construction, so mutating the original
/// collection afterwards has no effect on iteration. Rewinding is free and
/// repeatable.
#[derive(Debug, Clone)]
pub struct CollectionCursor<T> {
    items: Vec<T>,
    position: usize,
}

impl<T> CollectionCursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        CollectionCursor { items, position: 0 }
    }

    /// The snapshot this cursor walks
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> FromIterator<T> for CollectionCursor<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        CollectionCursor::new(iter.into_iter().collect())
    }
}

impl<T: Clone> Cursor for CollectionCursor<T> {
    type Item = T;
    type Error = Infallible;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.position = 0;
        Ok(())
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        Ok(self.position < self.items.len())
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.items.get(self.position).cloned())
    }

    fn key(&self) -> usize {
        self.position
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if self.position < self.items.len() {
            self.position += 1;
        }
        Ok(())
    }

    fn exact_len(&self) -> Option<usize> {
        Some(self.items.len())
    }
}
