//! Iterator bridge for cursors.
//!
//! [`CursorIter`] drives any cursor through the std [`Iterator`] protocol, so a
//! pipeline can be consumed with a `for` loop or handed to iterator adapters.
//! Each item is a `Result`: an upstream error is yielded once and ends the
//! iteration.
//!
//! ```rust
//! use fluentseq::prelude::*;
//!
//! let mut cursor = of(vec![1, 2, 3]).map(|n, _| n * 10);
//! let mut seen = Vec::new();
//! for item in cursor.iter() {
//!     seen.push(item.unwrap());
//! }
//! assert_eq!(seen, vec![10, 20, 30]);
//! ```

use crate::cursor::Cursor;

/// Iterator adapter over a [`Cursor`].
///
/// The cursor is rewound before the first item. Advancing is deferred until
/// the next item is requested, so the cursor is never pulled past what the
/// caller consumed.
pub struct CursorIter<C> {
    cursor: C,
    started: bool,
    pending_advance: bool,
    finished: bool,
}

impl<C: Cursor> CursorIter<C> {
    /// Create a new iterator over a cursor.
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            started: false,
            pending_advance: false,
            finished: false,
        }
    }

    /// Check if the iterator has stopped, either exhausted or after an error.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the iterator and return the wrapped cursor.
    pub fn into_inner(self) -> C {
        self.cursor
    }

    fn step(&mut self) -> Result<Option<C::Item>, C::Error> {
        if !self.started {
            self.started = true;
            self.cursor.rewind()?;
        }
        if self.pending_advance {
            self.pending_advance = false;
            self.cursor.advance()?;
        }
        if !self.cursor.valid()? {
            return Ok(None);
        }
        let item = self.cursor.current()?;
        self.pending_advance = item.is_some();
        Ok(item)
    }
}

impl<C: Cursor> Iterator for CursorIter<C> {
    type Item = Result<C::Item, C::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.step() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.started || self.finished, self.cursor.exact_len()) {
            (false, Some(len)) => (len, Some(len)),
            _ => (0, None),
        }
    }
}
