use crate::cursor::Cursor;
use crate::fingerprint::{Fingerprint, Fingerprinted};
use std::collections::HashSet;
use tracing::trace;

/// Cursor that drops elements whose [`Fingerprint`] was already produced
///
/// The first occurrence wins and relative order is kept. The seen-set grows
/// with the number of distinct elements, so high-cardinality or infinite
/// sources keep growing it for as long as they are pulled. It is cleared on
/// rewind. An accepted element is read from upstream twice, once to fingerprint
/// it and once when it is passed on.
pub struct Distinct<C> {
    upstream: C,
    seen: HashSet<Fingerprint>,
    accepted: bool,
    position: usize,
}

impl<C> Distinct<C> {
    pub fn new(upstream: C) -> Self {
        Distinct {
            upstream,
            seen: HashSet::new(),
            accepted: false,
            position: 0,
        }
    }
}

impl<C> Cursor for Distinct<C>
where
    C: Cursor,
    C::Item: Fingerprinted,
{
    type Item = C::Item;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.seen.clear();
        self.accepted = false;
        self.position = 0;
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
            if self.seen.insert(item.fingerprint()) {
                self.accepted = true;
                return Ok(true);
            }
            trace!(upstream = self.upstream.key(), "dropping duplicate");
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
        self.position
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if self.valid()? {
            self.accepted = false;
            self.position += 1;
            self.upstream.advance()?;
        }
        Ok(())
    }
}

pub trait DistinctExt: Cursor + Sized {
    /// Keep only the first occurrence of every element
    fn distinct(self) -> Distinct<Self>
    where
        Self::Item: Fingerprinted,
    {
        Distinct::new(self)
    }
}

impl<C: Cursor> DistinctExt for C {}
