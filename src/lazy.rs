use crate::cursor::Cursor;
use tracing::trace;

/// A cursor that defers building its upstream until the first pull
///
/// The factory runs again on every rewind, so a generator-style source wrapped
/// in `lazy` can be traversed any number of times.
pub struct Lazy<F, C> {
    factory: F,
    upstream: Option<C>,
}

impl<F, C> Lazy<F, C>
where
    F: Fn() -> C,
    C: Cursor,
{
    /// Create a lazy cursor with the given factory function
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            upstream: None,
        }
    }

    fn upstream(&mut self) -> &mut C {
        self.upstream.get_or_insert_with(|| {
            trace!("building lazy upstream");
            (self.factory)()
        })
    }
}

impl<F, C> Cursor for Lazy<F, C>
where
    F: Fn() -> C,
    C: Cursor,
{
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        // a fresh upstream starts at position 0
        self.upstream = None;
        Ok(())
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        self.upstream().valid()
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        self.upstream().current()
    }

    fn key(&self) -> usize {
        self.upstream.as_ref().map_or(0, Cursor::key)
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        self.upstream().advance()
    }

    fn exact_len(&self) -> Option<usize> {
        self.upstream.as_ref().and_then(Cursor::exact_len)
    }
}

/// Create a lazy cursor from a factory function
///
/// ```
/// use fluentseq::prelude::*;
///
/// let mut squares = lazy(|| Source::push((1..=3).map(|n| n * n)));
/// assert_eq!(squares.to_vec(), Ok(vec![1, 4, 9]));
/// assert_eq!(squares.to_vec(), Ok(vec![1, 4, 9]));
/// ```
pub fn lazy<F, C>(factory: F) -> Lazy<F, C>
where
    F: Fn() -> C,
    C: Cursor,
{
    Lazy::new(factory)
}
