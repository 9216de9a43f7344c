use crate::cursor::Cursor;
use smallvec::SmallVec;
use tracing::trace;

/// Cursor that expands every upstream element into a sub-sequence and yields
/// the sub-sequences back to back
///
/// One sub-sequence is buffered at a time. Empty ones are skipped, so the output
/// has no holes and positions stay dense.
pub struct Flatten<C, F, U> {
    upstream: C,
    expand: F,
    buffer: SmallVec<[U; 4]>,
    index: usize,
    buffered: bool,
    position: usize,
}

impl<C, F, U> Flatten<C, F, U> {
    pub fn new(upstream: C, expand: F) -> Self {
        Flatten {
            upstream,
            expand,
            buffer: SmallVec::new(),
            index: 0,
            buffered: false,
            position: 0,
        }
    }
}

impl<C, F, I, U> Cursor for Flatten<C, F, U>
where
    C: Cursor,
    F: FnMut(C::Item, usize) -> I,
    I: IntoIterator<Item = U>,
    U: Clone,
{
    type Item = U;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.buffer.clear();
        self.index = 0;
        self.buffered = false;
        self.position = 0;
        self.upstream.rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        loop {
            if self.index < self.buffer.len() {
                return Ok(true);
            }

            if self.buffered {
                self.buffer.clear();
                self.index = 0;
                self.buffered = false;
                self.upstream.advance()?;
            }

            if !self.upstream.valid()? {
                return Ok(false);
            }
            let Some(item) = self.upstream.current()? else {
                return Ok(false);
            };

            let upstream_position = self.upstream.key();
            self.buffer.extend((self.expand)(item, upstream_position));
            self.buffered = true;
            if self.buffer.is_empty() {
                trace!(upstream = upstream_position, "skipping empty sub-sequence");
            }
        }
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if !self.valid()? {
            return Ok(None);
        }
        Ok(self.buffer.get(self.index).cloned())
    }

    fn key(&self) -> usize {
        self.position
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if self.valid()? {
            self.index += 1;
            self.position += 1;
        }
        Ok(())
    }
}

fn identity<T>(item: T, _position: usize) -> T {
    item
}

pub trait FlattenExt: Cursor + Sized {
    /// Expand every element into zero or more elements
    ///
    /// The callback receives the element and its upstream position.
    fn flat_map<F, I>(self, expand: F) -> Flatten<Self, F, I::Item>
    where
        F: FnMut(Self::Item, usize) -> I,
        I: IntoIterator,
    {
        Flatten::new(self, expand)
    }

    /// Concatenate elements that are themselves sequences
    #[allow(clippy::type_complexity)]
    fn flatten(
        self,
    ) -> Flatten<Self, fn(Self::Item, usize) -> Self::Item, <Self::Item as IntoIterator>::Item>
    where
        Self::Item: IntoIterator,
    {
        Flatten::new(self, identity::<Self::Item>)
    }
}

impl<C: Cursor> FlattenExt for C {}
