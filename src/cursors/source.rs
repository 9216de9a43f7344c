use super::collection::CollectionCursor;
use super::push::PushCursor;
use crate::cursor::{BoxedCursor, Cursor};
use std::collections::VecDeque;
use std::convert::Infallible;

type BoxedIter<'a, T, E> = Box<dyn Iterator<Item = Result<T, E>> + 'a>;

/// The supported source representations, resolved once at construction
enum SourceKind<'a, T, E> {
    /// Owned snapshot, restartable
    Collection(CollectionCursor<T>),
    /// Caller-provided cursor, wrapped as-is
    External(BoxedCursor<'a, T, E>),
    /// Push-style iterator, single pass
    Push(PushCursor<BoxedIter<'a, T, E>, T>),
}

/// Source adapter: the leaf of every pipeline
///
/// Normalizes a collection, an external cursor or a push-style iterator into the
/// cursor protocol. Positions are renumbered densely from 0 regardless of how the
/// wrapped source numbers its elements.
///
/// - Collections are copied at construction so later changes to the original do
///   not leak into iteration.
/// - External cursors are wrapped, not copied; mutating them during traversal is
///   the caller's business.
/// - Push iterators are single-pass: a second pass after elements were produced
///   continues where the iterator stopped.
pub struct Source<'a, T, E = Infallible> {
    kind: SourceKind<'a, T, E>,
    position: usize,
}

fn absurd<E>(never: Infallible) -> E {
    match never {}
}

impl<'a, T: 'a, E: 'a> Source<'a, T, E> {
    /// Take ownership of a collection snapshot
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::with_kind(SourceKind::Collection(CollectionCursor::new(items)))
    }

    /// Snapshot any finite collection
    pub fn collect_from(items: impl IntoIterator<Item = T>) -> Self {
        Self::from_vec(items.into_iter().collect())
    }

    /// Wrap a cursor implemented outside the pipeline
    pub fn external(cursor: impl Cursor<Item = T, Error = E> + 'a) -> Self {
        Self::with_kind(SourceKind::External(Box::new(cursor)))
    }

    /// Wrap a single-pass iterator whose elements may fail
    ///
    /// An `Err` item is returned from whichever cursor call pulled it. Counting
    /// always pulls every element, so any error is reported.
    pub fn try_push(iter: impl IntoIterator<Item = Result<T, E>> + 'a) -> Self {
        let iter: BoxedIter<'a, T, E> = Box::new(iter.into_iter());
        Self::with_kind(SourceKind::Push(PushCursor::new(iter)))
    }

    fn with_kind(kind: SourceKind<'a, T, E>) -> Self {
        Source { kind, position: 0 }
    }

    /// Whether this source can be traversed any number of times
    pub fn is_restartable(&self) -> bool {
        !matches!(self.kind, SourceKind::Push(_))
    }
}

impl<T: Clone, E> Cursor for Source<'_, T, E> {
    type Item = T;
    type Error = E;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.position = 0;
        match &mut self.kind {
            SourceKind::Collection(cursor) => cursor.rewind().map_err(absurd),
            SourceKind::External(cursor) => cursor.rewind(),
            SourceKind::Push(cursor) => cursor.rewind(),
        }
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        match &mut self.kind {
            SourceKind::Collection(cursor) => cursor.valid().map_err(absurd),
            SourceKind::External(cursor) => cursor.valid(),
            SourceKind::Push(cursor) => cursor.valid(),
        }
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            SourceKind::Collection(cursor) => cursor.current().map_err(absurd),
            SourceKind::External(cursor) => cursor.current(),
            SourceKind::Push(cursor) => cursor.current(),
        }
    }

    fn key(&self) -> usize {
        self.position
    }

    fn advance(&mut self) -> Result<(), Self::Error> {
        if !self.valid()? {
            return Ok(());
        }
        match &mut self.kind {
            SourceKind::Collection(cursor) => cursor.advance().map_err(absurd)?,
            SourceKind::External(cursor) => cursor.advance()?,
            SourceKind::Push(cursor) => cursor.advance()?,
        }
        self.position += 1;
        Ok(())
    }

    fn exact_len(&self) -> Option<usize> {
        match &self.kind {
            SourceKind::Collection(cursor) => cursor.exact_len(),
            SourceKind::External(cursor) => cursor.exact_len(),
            SourceKind::Push(cursor) => cursor.exact_len(),
        }
    }
}

impl<'a, T: 'a> Source<'a, T> {
    /// Wrap a single-pass iterator
    ///
    /// The iterator is only pulled when the pipeline is driven, so infinite
    /// iterators are fine as long as a later stage bounds the traversal.
    pub fn push(iter: impl IntoIterator<Item = T> + 'a) -> Self {
        let iter: BoxedIter<'a, T, Infallible> = Box::new(iter.into_iter().map(Ok));
        Self::with_kind(SourceKind::Push(PushCursor::new(iter).counted_by_hint()))
    }
}

/// Conversion into a [`Source`]
///
/// Implemented for the collection types that can be snapshotted. Iterators go
/// through [`Source::push`] instead, since they are single-pass.
pub trait IntoSource<'a> {
    type Item;

    fn into_source(self) -> Source<'a, Self::Item>;
}

impl<'a, T: 'a> IntoSource<'a> for Vec<T> {
    type Item = T;

    fn into_source(self) -> Source<'a, T> {
        Source::from_vec(self)
    }
}

impl<'a, T: Clone + 'a> IntoSource<'a> for &[T] {
    type Item = T;

    fn into_source(self) -> Source<'a, T> {
        Source::from_vec(self.to_vec())
    }
}

impl<'a, T: 'a, const N: usize> IntoSource<'a> for [T; N] {
    type Item = T;

    fn into_source(self) -> Source<'a, T> {
        Source::collect_from(self)
    }
}

impl<'a, T: 'a> IntoSource<'a> for VecDeque<T> {
    type Item = T;

    fn into_source(self) -> Source<'a, T> {
        Source::collect_from(self)
    }
}

impl<'a, T> IntoSource<'a> for Source<'a, T> {
    type Item = T;

    fn into_source(self) -> Source<'a, T> {
        self
    }
}

/// Construction entry point for a pipeline
///
/// ```
/// use fluentseq::prelude::*;
///
/// let evens = of(vec![1, 2, 3, 4]).filter(|n, _| n % 2 == 0).to_vec();
/// assert_eq!(evens, Ok(vec![2, 4]));
/// ```
pub fn of<'a, S: IntoSource<'a>>(source: S) -> Source<'a, S::Item> {
    source.into_source()
}
