use super::cursor::Cursor;

/// Cursor combinator that transforms every upstream element using a mapping function
///
/// The mapper runs on each `current` read; nothing is cached, so reading the same
/// position twice calls it twice.
pub struct Map<C, F> {
    upstream: C,
    mapper: F,
}

impl<C, F> Map<C, F> {
    pub fn new(upstream: C, mapper: F) -> Self {
        Map { upstream, mapper }
    }
}

impl<C, F, U> Cursor for Map<C, F>
where
    C: Cursor,
    F: FnMut(C::Item, usize) -> U,
{
    type Item = U;
    type Error = C::Error;

    fn rewind(&mut self) -> Result<(), Self::Error> {
        self.upstream.rewind()
    }

    fn valid(&mut self) -> Result<bool, Self::Error> {
        self.upstream.valid()
    }

    fn current(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        let position = self.upstream.key();
        let mapped = self
            .upstream
            .current()?
            .map(|value| (self.mapper)(value, position));
        Ok(mapped)
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

/// Extension trait to add .map() method support for cursors
pub trait MapExt: Cursor + Sized {
    fn map<F, U>(self, mapper: F) -> Map<Self, F>
    where
        F: FnMut(Self::Item, usize) -> U,
    {
        Map::new(self, mapper)
    }
}

/// Implement MapExt for all cursors
impl<C> MapExt for C where C: Cursor {}

/// Convenience function to create a Map cursor
pub fn map<C, F, U>(upstream: C, mapper: F) -> Map<C, F>
where
    C: Cursor,
    F: FnMut(C::Item, usize) -> U,
{
    Map::new(upstream, mapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::of;
    use crate::terminal::Terminal;

    #[derive(Debug, PartialEq)]
    enum Token {
        Letter(char),
        Number(i64),
    }

    #[test]
    fn test_map_numbers_to_strings() {
        let result = of(vec![1, 2, 3])
            .map(|n, _| format!("Number: {}", n))
            .to_vec()
            .unwrap();
        assert_eq!(result, vec!["Number: 1", "Number: 2", "Number: 3"]);
    }

    #[test]
    fn test_map_to_enum() {
        let result = of(vec!["x", "42"])
            .map(|s, _| match s.parse::<i64>() {
                Ok(n) => Token::Number(n),
                Err(_) => Token::Letter(s.chars().next().unwrap_or('?')),
            })
            .to_vec()
            .unwrap();
        assert_eq!(result, vec![Token::Letter('x'), Token::Number(42)]);
    }

    #[test]
    fn test_mapper_receives_position() {
        let result = of(vec!['a', 'b', 'c'])
            .map(|c, position| format!("{}{}", position, c))
            .to_vec()
            .unwrap();
        assert_eq!(result, vec!["0a", "1b", "2c"]);
    }

    #[test]
    fn test_mapper_runs_on_every_read() {
        let mut calls = 0;
        let mut cursor = map(of(vec![5]), |n, _| {
            calls += 1;
            n * 2
        });

        assert_eq!(cursor.current().unwrap(), Some(10));
        assert_eq!(cursor.current().unwrap(), Some(10));
        drop(cursor);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_map_chaining() {
        let result = of(vec!['5', '7'])
            .map(|c, _| c.to_digit(10).unwrap_or(0))
            .map(|d, _| d * 10)
            .map(|n, _| format!("Value: {}", n))
            .to_vec()
            .unwrap();
        assert_eq!(result, vec!["Value: 50", "Value: 70"]);
    }

    #[test]
    fn test_map_keeps_count_and_positions() {
        let mut cursor = of(vec![1, 2, 3, 4]).map(|n, _| n * n);
        assert_eq!(cursor.exact_len(), Some(4));

        cursor.advance().unwrap();
        assert_eq!(cursor.key(), 1);
        assert_eq!(cursor.current().unwrap(), Some(4));
    }
}
