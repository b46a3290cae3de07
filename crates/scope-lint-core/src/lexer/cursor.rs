//! Character cursor with line/column bookkeeping.

use crate::token::Position;

/// Walks a source string one character at a time.
///
/// Every consumed character goes through [`Cursor::bump`], so line and column
/// stay exact whether the scanner is producing a token or skipping a comment.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'src> {
    source: &'src str,
    pos: Position,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: Position::START,
        }
    }

    /// Current position.
    pub(crate) fn position(&self) -> Position {
        self.pos
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.pos.offset >= self.source.len()
    }

    /// Unconsumed remainder of the source.
    pub(crate) fn rest(&self) -> &'src str {
        &self.source[self.pos.offset..]
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consumes one character, advancing the line on `\n`.
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos.offset += c.len_utf8();
        if c == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(c)
    }

    /// Consumes `n` characters.
    pub(crate) fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }

    /// Consumes characters while `predicate` holds.
    pub(crate) fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    /// Consumes `prefix` if the remainder starts with it.
    pub(crate) fn eat(&mut self, prefix: &str) -> bool {
        if self.starts_with(prefix) {
            self.bump_n(prefix.chars().count());
            true
        } else {
            false
        }
    }

    /// Source text between `start` and the current position.
    pub(crate) fn slice_from(&self, start: Position) -> &'src str {
        &self.source[start.offset..self.pos.offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd");
        cursor.bump_n(2);
        assert_eq!(cursor.position().column, 3);
        cursor.bump();
        let pos = cursor.position();
        assert_eq!((pos.line, pos.column, pos.offset), (2, 1, 3));
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let mut cursor = Cursor::new("é=1");
        cursor.bump();
        let pos = cursor.position();
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 2);
        assert_eq!(cursor.peek(), Some('='));
    }

    #[test]
    fn eat_consumes_only_on_match() {
        let mut cursor = Cursor::new("/*x*/");
        assert!(!cursor.eat("//"));
        assert!(cursor.eat("/*"));
        assert_eq!(cursor.rest(), "x*/");
    }

    #[test]
    fn slice_from_returns_consumed_text() {
        let mut cursor = Cursor::new("name rest");
        let start = cursor.position();
        cursor.bump_while(|c| c.is_ascii_alphabetic());
        assert_eq!(cursor.slice_from(start), "name");
        assert_eq!(cursor.peek(), Some(' '));
        assert!(!cursor.is_at_end());
    }
}
