/// Pull-based cursor protocol shared by every pipeline stage
///
/// A cursor represents a position in a (possibly infinite) sequence of elements.
/// Stages wrap an upstream cursor and re-derive their own state from it on demand,
/// so building a pipeline never pulls anything; only `valid`, `current` and
/// `advance` do.
///
/// The protocol mirrors a classic rewindable iterator:
///
/// ```text
/// rewind()?;
/// while valid()? {
///     let item = current()?;
///     let position = key();
///     advance()?;
/// }
/// ```
pub trait Cursor {
    /// The type of elements this cursor produces
    type Item;

    /// Error raised by the underlying source, passed through every stage untouched
    type Error;

    /// Reset the cursor to the start of the sequence
    ///
    /// After a rewind `key()` reports 0. Single-pass sources may not be able to
    /// restart; see [`Source`](crate::Source) for the exact behavior.
    fn rewind(&mut self) -> Result<(), Self::Error>;

    /// Check whether a current element exists
    ///
    /// This may pull from upstream (skipping filtered or duplicate elements) but
    /// calling it again without advancing returns the same answer without
    /// consuming anything else.
    fn valid(&mut self) -> Result<bool, Self::Error>;

    /// Read the element at the current position
    ///
    /// Returns `Ok(None)` once the sequence is exhausted.
    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error>;

    /// Get the current position in the sequence
    fn key(&self) -> usize;

    /// Move past the current element
    ///
    /// If already exhausted the cursor stays exhausted.
    fn advance(&mut self) -> Result<(), Self::Error>;

    /// Total number of elements, if it can be known without traversal
    fn exact_len(&self) -> Option<usize> {
        None
    }

    /// Total number of elements
    ///
    /// Uses [`exact_len`](Cursor::exact_len) when available, otherwise rewinds and
    /// walks the whole sequence. The walk leaves the cursor exhausted.
    fn count_all(&mut self) -> Result<usize, Self::Error> {
        if let Some(len) = self.exact_len() {
            return Ok(len);
        }

        self.rewind()?;
        let mut count = 0;
        while self.valid()? {
            count += 1;
            self.advance()?;
        }
        Ok(count)
    }
}

/// Type-erased cursor, used where stages of different concrete types are combined
pub type BoxedCursor<'a, T, E> = Box<dyn Cursor<Item = T, Error = E> + 'a>;

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        (**self).rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        (**self).valid()
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).current()
    }

    fn key(&self) -> usize {
        (**self).key()
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        (**self).advance()
    }

    fn exact_len(&self) -> Option<usize> {
        (**self).exact_len()
    }

    fn count_all(&mut self) -> Result<usize, Self::Error> {
        (**self).count_all()
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        (**self).rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        (**self).valid()
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).current()
    }

    fn key(&self) -> usize {
        (**self).key()
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        (**self).advance()
    }

    fn exact_len(&self) -> Option<usize> {
        (**self).exact_len()
    }

    fn count_all(&mut self) -> Result<usize, Self::Error> {
        (**self).count_all()
    }
}
