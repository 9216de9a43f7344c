use crate::cursor::Cursor;
use crate::iter::CursorIter;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::ops::ControlFlow;

/// Rewind `cursor` and thread `state` through `visit` for every element,
/// stopping early when it breaks
fn drive<C, S, B, F>(cursor: &mut C, mut state: S, mut visit: F) -> Result<ControlFlow<B, S>, C::Error>
where
    C: Cursor + ?Sized,
    F: FnMut(S, C::Item, usize) -> ControlFlow<B, S>,
{
    cursor.rewind()?;
    while cursor.valid()? {
        let position = cursor.key();
        let Some(item) = cursor.current()? else {
            break;
        };
        state = match visit(state, item, position) {
            ControlFlow::Continue(next) => next,
            ControlFlow::Break(found) => return Ok(ControlFlow::Break(found)),
        };
        cursor.advance()?;
    }
    Ok(ControlFlow::Continue(state))
}

/// [`drive`] without state, returning the value that stopped it
fn search<C, B, F>(cursor: &mut C, mut visit: F) -> Result<Option<B>, C::Error>
where
    C: Cursor + ?Sized,
    F: FnMut(C::Item, usize) -> ControlFlow<B>,
{
    Ok(drive(cursor, (), |(), item, position| visit(item, position))?.break_value())
}

/// Operations that drive a pipeline and produce a final result
///
/// Every operation rewinds the cursor first, so calling one twice on a
/// restartable pipeline gives the same answer. Short-circuiting operations stop
/// pulling as soon as the answer is known. Upstream errors abort the operation
/// and no partial result is returned.
pub trait Terminal: Cursor {
    /// Call `f` for every element and its position
    fn walk<F>(&mut self, mut f: F) -> Result<(), Self::Error>
    where
        F: FnMut(Self::Item, usize),
    {
        self.fold((), |(), item, position| f(item, position))
    }

    /// Combine all elements into an optional accumulator
    ///
    /// The result is `None` only when `initial` was `None` and the reducer never
    /// produced a value.
    fn reduce<A, F>(&mut self, reducer: F, initial: Option<A>) -> Result<Option<A>, Self::Error>
    where
        F: FnMut(Option<A>, Self::Item, usize) -> Option<A>,
    {
        self.fold(initial, reducer)
    }

    /// Combine all elements into an accumulator that always has a value
    fn fold<A, F>(&mut self, init: A, mut f: F) -> Result<A, Self::Error>
    where
        F: FnMut(A, Self::Item, usize) -> A,
    {
        let folded = drive(self, init, |accumulator, item, position| {
            ControlFlow::<Infallible, A>::Continue(f(accumulator, item, position))
        })?;
        match folded {
            ControlFlow::Continue(accumulator) => Ok(accumulator),
            ControlFlow::Break(never) => match never {},
        }
    }

    /// Smallest element by `compare`; the first one wins a tie
    fn min_by<F>(&mut self, mut compare: F) -> Result<Option<Self::Item>, Self::Error>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.reduce(
            |best, item, _| match best {
                Some(best) if compare(&item, &best) != Ordering::Less => Some(best),
                _ => Some(item),
            },
            None,
        )
    }

    /// Largest element by `compare`; the first one wins a tie
    fn max_by<F>(&mut self, mut compare: F) -> Result<Option<Self::Item>, Self::Error>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.reduce(
            |best, item, _| match best {
                Some(best) if compare(&item, &best) != Ordering::Greater => Some(best),
                _ => Some(item),
            },
            None,
        )
    }

    fn min(&mut self) -> Result<Option<Self::Item>, Self::Error>
    where
        Self::Item: Ord,
    {
        self.min_by(Ord::cmp)
    }

    fn max(&mut self) -> Result<Option<Self::Item>, Self::Error>
    where
        Self::Item: Ord,
    {
        self.max_by(Ord::cmp)
    }

    /// First element matching `predicate`
    fn find_one<P>(&mut self, mut predicate: P) -> Result<Option<Self::Item>, Self::Error>
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        search(self, |item, position| {
            if predicate(&item, position) {
                ControlFlow::Break(item)
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// The `index`-th element in traversal order, counting from 0
    fn find_by_index(&mut self, index: usize) -> Result<Option<Self::Item>, Self::Error> {
        let mut seen = 0;
        search(self, |item, _| {
            if seen == index {
                return ControlFlow::Break(item);
            }
            seen += 1;
            ControlFlow::Continue(())
        })
    }

    fn find_first(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        search(self, |item, _| ControlFlow::Break(item))
    }

    fn find_last(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        let mut last = None;
        self.walk(|item, _| last = Some(item))?;
        Ok(last)
    }

    /// Number of elements
    ///
    /// Uses the count reported by the chain when every stage knows it,
    /// otherwise traverses.
    fn count(&mut self) -> Result<usize, Self::Error> {
        self.count_all()
    }

    /// Whether every element matches; `true` for an empty sequence
    fn match_all<P>(&mut self, mut predicate: P) -> Result<bool, Self::Error>
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        let failed = search(self, |item, position| {
            if predicate(&item, position) {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        })?;
        Ok(failed.is_none())
    }

    /// Whether at least one element matches; `false` for an empty sequence
    fn match_any<P>(&mut self, predicate: P) -> Result<bool, Self::Error>
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        Ok(self.find_one(predicate)?.is_some())
    }

    /// Whether no element matches; `true` for an empty sequence
    fn match_none<P>(&mut self, predicate: P) -> Result<bool, Self::Error>
    where
        P: FnMut(&Self::Item, usize) -> bool,
    {
        Ok(!self.match_any(predicate)?)
    }

    /// Collect every element in traversal order
    fn to_vec(&mut self) -> Result<Vec<Self::Item>, Self::Error> {
        let mut items = Vec::with_capacity(self.exact_len().unwrap_or(0));
        self.walk(|item, _| items.push(item))?;
        Ok(items)
    }

    /// Borrow the cursor as a std iterator of `Result`s
    fn iter(&mut self) -> CursorIter<&mut Self>
    where
        Self: Sized,
    {
        CursorIter::new(self)
    }
}

impl<C: Cursor + ?Sized> Terminal for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Source;
    use crate::cursors::of;
    use crate::filter::FilterExt;
    use crate::map::MapExt;
    use crate::slice::SliceExt;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Cursor that fails when reading any element past `fail_after`
    struct FailingCursor {
        items: Vec<i32>,
        index: usize,
        fail_after: usize,
        reads: Rc<Cell<usize>>,
    }

    impl FailingCursor {
        fn new(items: Vec<i32>, fail_after: usize) -> Self {
            FailingCursor {
                items,
                index: 0,
                fail_after,
                reads: Rc::new(Cell::new(0)),
            }
        }
    }

    impl Cursor for FailingCursor {
        type Item = i32;
        type Error = String;

        fn rewind(&mut self) -> Result<(), Self::Error> {
            self.index = 0;
            Ok(())
        }

        fn valid(&mut self) -> Result<bool, Self::Error> {
            Ok(self.index < self.items.len())
        }

        fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
            self.reads.set(self.reads.get() + 1);
            if self.index > self.fail_after {
                return Err(format!("read past {}", self.fail_after));
            }
            Ok(self.items.get(self.index).copied())
        }

        fn key(&self) -> usize {
            self.index
        }

        fn advance(&mut self) -> Result<(), Self::Error> {
            self.index += 1;
            Ok(())
        }
    }

    #[test]
    fn test_walk_sees_positions() {
        let mut seen = Vec::new();
        of(vec!['q', 'w', 'e'])
            .walk(|c, position| seen.push((position, c)))
            .unwrap();
        assert_eq!(seen, vec![(0, 'q'), (1, 'w'), (2, 'e')]);
    }

    #[rstest]
    #[case::sum(vec![1, 2, 3], None, Some(6))]
    #[case::with_initial(vec![1, 2, 3], Some(10), Some(16))]
    #[case::empty_without_initial(vec![], None, None)]
    #[case::empty_with_initial(vec![], Some(5), Some(5))]
    fn test_reduce(
        #[case] input: Vec<i32>,
        #[case] initial: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        let result = of(input)
            .reduce(|acc, n, _| Some(acc.unwrap_or(0) + n), initial)
            .unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_reduce_receives_positions() {
        let result = of(vec!["q", "w"])
            .reduce(
                |acc, s, position| Some(format!("{}{}{}", acc.unwrap_or_default(), position, s)),
                None,
            )
            .unwrap();
        assert_eq!(result.as_deref(), Some("0q1w"));
    }

    #[test]
    fn test_fold() {
        let total = of(vec![1, 2, 3, 4]).fold(100, |acc, n, _| acc - n).unwrap();
        assert_eq!(total, 90);
        assert_eq!(of(Vec::<i32>::new()).fold(7, |acc, n, _| acc + n).unwrap(), 7);
    }

    #[test]
    fn test_fold_rewinds_and_aborts_on_error() {
        let mut cursor = FailingCursor::new(vec![1, 2, 3], 5);
        assert_eq!(cursor.fold(0, |acc, n, _| acc + n), Ok(6));
        assert_eq!(cursor.fold(0, |acc, n, _| acc + n), Ok(6));

        let mut failing = FailingCursor::new(vec![1, 2, 3], 1);
        assert_eq!(failing.fold(0, |acc, n, _| acc + n), Err("read past 1".to_string()));
    }

    #[test]
    fn test_min_max_ties_keep_first() {
        let groups = vec![vec![1, 1, 1], vec![2, 2, 2], vec![3, 3]];

        let longest = of(groups.clone())
            .max_by(|a, b| a.len().cmp(&b.len()))
            .unwrap();
        assert_eq!(longest, Some(vec![1, 1, 1]));

        let longest_reversed = of(groups.clone())
            .min_by(|a, b| b.len().cmp(&a.len()))
            .unwrap();
        assert_eq!(longest_reversed, Some(vec![1, 1, 1]));

        let shortest = of(groups).min_by(|a, b| a.len().cmp(&b.len())).unwrap();
        assert_eq!(shortest, Some(vec![3, 3]));
    }

    #[test]
    fn test_min_max_natural_order() {
        let mut cursor = of(vec![3, 9, -2, 9, 4]);
        assert_eq!(cursor.min().unwrap(), Some(-2));
        assert_eq!(cursor.max().unwrap(), Some(9));
        assert_eq!(of(Vec::<u8>::new()).max().unwrap(), None);
    }

    #[test]
    fn test_find_one_short_circuits() {
        let mut cursor = FailingCursor::new(vec![0, 1, 2, 3], 1);
        let reads = Rc::clone(&cursor.reads);

        assert_eq!(cursor.find_one(|n, _| *n == 1), Ok(Some(1)));
        assert_eq!(reads.get(), 2);
    }

    #[test]
    fn test_errors_abort_without_partial_result() {
        let mut cursor = FailingCursor::new(vec![0, 1, 2, 3], 1);
        assert_eq!(cursor.to_vec(), Err("read past 1".to_string()));
        assert_eq!(cursor.find_one(|n, _| *n == 3), Err("read past 1".to_string()));
        assert_eq!(cursor.count(), Ok(4));
    }

    #[test]
    fn test_errors_pass_through_stages() {
        let mut cursor = Source::external(FailingCursor::new(vec![0, 1, 2, 3], 2))
            .map(|n, _| n * 10)
            .filter(|n, _| *n > 0);
        assert_eq!(cursor.find_first(), Ok(Some(10)));
        assert_eq!(cursor.find_last(), Err("read past 2".to_string()));
    }

    #[rstest]
    #[case::first(0, Some('q'))]
    #[case::middle(2, Some('e'))]
    #[case::last(3, Some('r'))]
    #[case::past_end(4, None)]
    fn test_find_by_index(#[case] index: usize, #[case] expected: Option<char>) {
        let result = of(vec!['q', 'w', 'e', 'r']).find_by_index(index).unwrap();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_find_by_index_counts_emitted_elements() {
        let result = of(vec![1, 2, 3, 4, 5, 6])
            .filter(|n, _| n % 2 == 0)
            .find_by_index(1)
            .unwrap();
        assert_eq!(result, Some(4));
    }

    #[test]
    fn test_find_first_and_last() {
        let mut cursor = of(vec!["q", "w", "e"]);
        assert_eq!(cursor.find_first().unwrap(), Some("q"));
        assert_eq!(cursor.find_last().unwrap(), Some("e"));

        let mut empty = of(Vec::<&str>::new());
        assert_eq!(empty.find_first().unwrap(), None);
        assert_eq!(empty.find_last().unwrap(), None);
    }

    #[test]
    fn test_found_empty_value_is_not_missing() {
        let mut cursor = of(vec![None, Some(1)]);
        assert_eq!(cursor.find_first().unwrap(), Some(None));
        assert_eq!(cursor.find_by_index(5).unwrap(), None);
    }

    #[test]
    fn test_count_does_not_disturb_restartable_source() {
        let mut cursor = of(vec![1, 2, 3]).map(|n, _| n + 1);
        assert_eq!(cursor.count().unwrap(), 3);
        assert_eq!(cursor.to_vec().unwrap(), vec![2, 3, 4]);

        let mut filtered = of(vec![1, 2, 3]).filter(|n, _| *n != 2);
        assert_eq!(filtered.count().unwrap(), 2);
        assert_eq!(filtered.to_vec().unwrap(), vec![1, 3]);
    }

    #[rstest]
    #[case::all_match(vec![2, 4, 6], true, true, false)]
    #[case::some_match(vec![1, 2, 3], false, true, false)]
    #[case::none_match(vec![1, 3], false, false, true)]
    #[case::empty(vec![], true, false, true)]
    fn test_matchers(
        #[case] input: Vec<i32>,
        #[case] all: bool,
        #[case] any: bool,
        #[case] none: bool,
    ) {
        let mut cursor = of(input);
        assert_eq!(cursor.match_all(|n, _| n % 2 == 0).unwrap(), all);
        assert_eq!(cursor.match_any(|n, _| n % 2 == 0).unwrap(), any);
        assert_eq!(cursor.match_none(|n, _| n % 2 == 0).unwrap(), none);
    }

    #[test]
    fn test_matchers_short_circuit() {
        let mut cursor = FailingCursor::new(vec![1, 2, 3], 1);
        assert_eq!(cursor.match_all(|n, _| *n < 2), Ok(false));
        assert_eq!(cursor.match_any(|n, _| *n == 2), Ok(true));
        assert_eq!(cursor.match_none(|n, _| *n == 1), Ok(false));
    }

    #[test]
    fn test_round_trip() {
        let original = of(vec!["q", "w", "e"]).to_vec().unwrap();
        let again = of(original.clone()).to_vec().unwrap();
        assert_eq!(again, original);
    }

    #[test]
    fn test_terminals_on_bounded_infinite_source() {
        let mut cursor = Source::push(1..).limit(4).unwrap();
        assert_eq!(cursor.fold(0, |acc, n, _| acc + n).unwrap(), 10);
    }
}
