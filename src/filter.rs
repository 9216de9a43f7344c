use crate::cursor::Cursor;

/// Cursor that only yields upstream elements accepted by a predicate
///
/// The predicate receives the element and its upstream position. Rejected
/// elements are skipped lazily, on the next validity check, and still consume
/// their position: keys reflect upstream consumption order, not the number of
/// accepted elements. An accepted element is read from upstream twice, once for
/// the predicate and once when it is passed on.
pub struct Filter<C, P> {
    upstream: C,
    predicate: P,
    accepted: bool,
}

impl<C, P> Filter<C, P> {
    pub fn new(upstream: C, predicate: P) -> Self {
        Filter {
            upstream,
            predicate,
            accepted: false,
        }
    }
}

impl<C, P> Cursor for Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item, usize) -> bool,
{
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.accepted = false;
        self.upstream.rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        if self.accepted {
            return Ok(true);
        }

        while self.upstream.valid()? {
            let Some(item) = self.upstream.current()? else {
                break;
            };
            if (self.predicate)(&item, self.upstream.key()) {
                self.accepted = true;
                return Ok(true);
            }
            self.upstream.advance()?;
        }
        Ok(false)
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        if !self.valid()? {
            return Ok(None);
        }
        self.upstream.current()
    }

    fn key(&self) -> usize {
        self.upstream.key()
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if self.valid()? {
            self.accepted = false;
            self.upstream.advance()?;
        }
        Ok(())
    }
}

/// Extension trait to add filter method to all cursors
pub trait FilterExt: Cursor + Sized {
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        Filter::new(self, predicate)
    }
}

impl<C: Cursor> FilterExt for C {}

/// Convenience function to create a filtered cursor
pub fn filter<C, P>(upstream: C, predicate: P) -> Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Item, usize) -> bool,
{
    Filter::new(upstream, predicate)
}
