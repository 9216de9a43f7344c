use crate::cursor::{BoxedCursor, Cursor};
use tracing::debug;

/// Cursor that concatenates its upstreams, exhausting each in order
///
/// Positions continue across upstream boundaries. Every upstream is rewound
/// together with the merge.
pub struct Merge<C> {
    upstreams: Vec<C>,
    index: usize,
    position: usize,
}

impl<C: Cursor> Merge<C> {
    pub fn new(upstreams: Vec<C>) -> Self {
        Merge {
            upstreams,
            index: 0,
            position: 0,
        }
    }
}

impl<C: Cursor> Cursor for Merge<C> {
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.index = 0;
        self.position = 0;
        for upstream in &mut self.upstreams {
            upstream.rewind()?;
        }
        Ok(())
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        while let Some(upstream) = self.upstreams.get_mut(self.index) {
            if upstream.valid()? {
                return Ok(true);
            }
            self.index += 1;
            if self.index < self.upstreams.len() {
                debug!(
                    upstream = self.index,
                    position = self.position,
                    "switching to next merged upstream"
                );
            }
        }
        Ok(false)
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if !self.valid()? {
            return Ok(None);
        }
        match self.upstreams.get_mut(self.index) {
            Some(upstream) => upstream.current(),
            None => Ok(None),
        }
    }

    fn key(&self) -> usize {
        self.position
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if !self.valid()? {
            return Ok(());
        }
        if let Some(upstream) = self.upstreams.get_mut(self.index) {
            upstream.advance()?;
            self.position += 1;
        }
        Ok(())
    }

    fn exact_len(&self) -> Option<usize> {
        self.upstreams.iter().map(|upstream| upstream.exact_len()).sum()
    }

    fn count_all(&mut self) -> Result<usize, Self::Error> {
        let mut total = 0;
        for upstream in &mut self.upstreams {
            total += upstream.count_all()?;
        }
        Ok(total)
    }
}

/// Concatenate any number of cursors of the same type
///
/// Only cursors are accepted:
///
/// ```compile_fail
/// let merged = fluentseq::merge(vec![123]);
/// ```
pub fn merge<I>(upstreams: I) -> Merge<I::Item>
where
    I: IntoIterator,
    I::Item: Cursor,
{
    Merge::new(upstreams.into_iter().collect())
}

pub trait MergeExt: Cursor + Sized {
    /// Append another cursor with the same item and error types
    ///
    /// Both sides are boxed, so cursors of different concrete types can be
    /// joined.
    fn merge<'a, O>(self, other: O) -> Merge<BoxedCursor<'a, Self::Item, Self::Error>>
    where
        Self: 'a,
        O: Cursor<Item = Self::Item, Error = Self::Error> + 'a,
    {
        let upstreams: Vec<BoxedCursor<'a, Self::Item, Self::Error>> =
            vec![Box::new(self), Box::new(other)];
        Merge::new(upstreams)
    }
}

impl<C: Cursor> MergeExt for C {}
