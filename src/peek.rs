use crate::cursor::Cursor;

/// Cursor that runs a side effect on every element read, passing it on unchanged
///
/// Handy for debugging a pipeline. The callback fires on each `current` call,
/// so code that reads the same position twice sees it twice. A downstream
/// [`filter`](crate::filter::FilterExt::filter) or
/// [`distinct`](crate::distinct::DistinctExt::distinct) reads an element once
/// to decide on it and again to pass it on, so every element such a stage
/// accepts is observed twice and every rejected one once.
pub struct Peek<C, F> {
    upstream: C,
    callback: F,
}

impl<C, F> Peek<C, F> {
    pub fn new(upstream: C, callback: F) -> Self {
        Peek { upstream, callback }
    }
}

impl<C, F> Cursor for Peek<C, F>
where
    C: Cursor,
    F: FnMut(&C::Item, usize),
{
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.upstream.rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        self.upstream.valid()
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        let current = self.upstream.current()?;
        if let Some(item) = &current {
            (self.callback)(item, self.upstream.key());
        }
        Ok(current)
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

pub trait PeekExt: Cursor + Sized {
    fn peek<F>(self, callback: F) -> Peek<Self, F>
    where
        F: FnMut(&Self::Item, usize),
    {
        Peek::new(self, callback)
    }
}

impl<C: Cursor> PeekExt for C {}
