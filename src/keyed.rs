use crate::cursor::Cursor;

/// Cursor that pairs every element with its upstream position
///
/// Useful where the position itself matters to a terminal operation, e.g.
/// materializing `(position, element)` pairs with `to_vec`.
pub struct Keyed<C> {
    upstream: C,
}

impl<C> Keyed<C> {
    pub fn new(upstream: C) -> Self {
        Keyed { upstream }
    }

    /// Unwrap the upstream cursor
    pub fn into_inner(self) -> C {
        self.upstream
    }
}

impl<C: Cursor> Cursor for Keyed<C> {
    type Item = (usize, C::Item);
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.upstream.rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        self.upstream.valid()
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        let position = self.upstream.key();
        Ok(self.upstream.current()?.map(|item| (position, item)))
    }

    fn key(&self) -> usize {
        self.upstream.key()
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        self.upstream.advance()
    }

    fn exact_len(&self) -> Option<usize> {
        self.upstream.exact_len()
    }

    fn count_all(&mut self) -> Result<usize, Self::Error> {
        self.upstream.count_all()
    }
}

/// Extension trait to expose positions alongside elements
pub trait KeyedExt: Cursor + Sized {
    fn keyed(self) -> Keyed<Self> {
        Keyed::new(self)
    }
}

impl<C> KeyedExt for C where C: Cursor {}
