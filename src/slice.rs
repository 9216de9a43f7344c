use crate::cursor::Cursor;
use crate::error::FluentError;

/// Cursor that yields a window of its upstream: `length` elements starting at `offset`
///
/// Skipping to `offset` happens lazily on the first validity check. Once
/// `offset + length` upstream elements were consumed the cursor reports itself
/// exhausted without pulling further, so bounding an infinite source terminates.
/// Keys are relative: the first element of the window is at position 0.
pub struct Slice<C> {
    upstream: C,
    offset: usize,
    length: Option<usize>,
    consumed: usize,
}

impl<C> Slice<C> {
    /// Create a slice, rejecting an empty window
    ///
    /// `length` of `None` means "until the upstream runs out".
    pub fn new(upstream: C, offset: usize, length: Option<usize>) -> Result<Self, FluentError> {
        if length == Some(0) {
            return Err(FluentError::invalid_argument(
                "slice length must be greater than 0",
            ));
        }
        Ok(Slice {
            upstream,
            offset,
            length,
            consumed: 0,
        })
    }

    fn end(&self) -> Option<usize> {
        self.length.map(|length| self.offset.saturating_add(length))
    }
}

impl<C: Cursor> Cursor for Slice<C> {
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.consumed = 0;
        self.upstream.rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        if self.end().is_some_and(|end| self.consumed >= end) {
            return Ok(false);
        }

        while self.consumed < self.offset {
            if !self.upstream.valid()? {
                return Ok(false);
            }
            self.upstream.advance()?;
            self.consumed += 1;
        }

        self.upstream.valid()
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if !self.valid()? {
            return Ok(None);
        }
        self.upstream.current()
    }

    fn key(&self) -> usize {
        self.consumed.saturating_sub(self.offset)
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if self.valid()? {
            self.upstream.advance()?;
            self.consumed += 1;
        }
        Ok(())
    }

    fn exact_len(&self) -> Option<usize> {
        let available = self.upstream.exact_len()?.saturating_sub(self.offset);
        Some(match self.length {
            Some(length) => available.min(length),
            None => available,
        })
    }
}

/// Extension trait adding windowing methods to all cursors
pub trait SliceExt: Cursor + Sized {
    /// Keep `length` elements starting at `offset`
    fn slice(self, offset: usize, length: Option<usize>) -> Result<Slice<Self>, FluentError> {
        Slice::new(self, offset, length)
    }

    /// Drop the first `offset` elements
    fn skip(self, offset: usize) -> Slice<Self> {
        Slice {
            upstream: self,
            offset,
            length: None,
            consumed: 0,
        }
    }

    /// Keep at most the first `length` elements
    fn limit(self, length: usize) -> Result<Slice<Self>, FluentError> {
        Slice::new(self, 0, Some(length))
    }
}

impl<C: Cursor> SliceExt for C {}
