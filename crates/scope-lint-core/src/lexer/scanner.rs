//! Hand-written scanner producing the flat token list.

use tracing::trace;

use super::cursor::Cursor;
use super::{LexError, LexErrorKind};
use crate::token::{Position, Token, TokenTag};

/// Three-character operators, tried first.
const OPERATORS_3: &[&str] = &["->*", "<<=", ">>=", "::*", "..."];

/// Two-character operators, tried after the three-character ones.
const OPERATORS_2: &[&str] = &[
    "->", "++", "--", ".*", "<<", ">>", "::", "<=", ">=", "==", "!=", "+=", "-=", "*=", "/=",
    "%=", "&=", "^=", "|=", "&&", "||",
];

/// Single-character operators and punctuation.
const OPERATORS_1: &str = "()[]{}.,:;?+-*/%~&^|=!<>";

pub(crate) struct Scanner<'src> {
    cursor: Cursor<'src>,
    tokens: Vec<Token>,
}

impl<'src> Scanner<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    pub(crate) fn scan(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.cursor.peek() {
            let start = self.cursor.position();
            match c {
                '#' => self.scan_preprocessor(start),
                '/' if self.cursor.starts_with("//!") => self.scan_directive(start),
                '/' if self.cursor.starts_with("//") => self.skip_line_comment(),
                '/' if self.cursor.starts_with("/*") => self.skip_block_comment(),
                '\n' => {
                    self.cursor.bump();
                }
                c if is_horizontal_space(c) => self.cursor.bump_while(is_horizontal_space),
                c if is_ident_start(c) => {
                    self.cursor.bump_while(is_ident_continue);
                    self.push(TokenTag::Identifier, start);
                }
                c if c.is_ascii_digit() => {
                    self.cursor.bump_while(|c| c.is_ascii_digit());
                    self.push(TokenTag::Number, start);
                }
                '"' | '\'' => self.scan_quoted(c, start)?,
                _ => self.scan_operator(c, start)?,
            }
        }
        Ok(self.tokens)
    }

    fn push(&mut self, tag: TokenTag, start: Position) {
        let token = Token::new(tag, self.cursor.slice_from(start), start);
        trace!(%token, "token");
        self.tokens.push(token);
    }

    /// `#` up to the end of the line, newline excluded.
    fn scan_preprocessor(&mut self, start: Position) {
        self.cursor.bump_while(|c| c != '\n');
        self.push(TokenTag::Preprocessor, start);
    }

    fn scan_directive(&mut self, start: Position) {
        self.cursor.eat("//!");
        let body_start = self.cursor.position();
        self.cursor.bump_while(|c| c != '\n');
        let body = self.cursor.slice_from(body_start);
        let token = Token::new(TokenTag::Directive, body, start);
        trace!(%token, "directive");
        self.tokens.push(token);
    }

    fn skip_line_comment(&mut self) {
        self.cursor.bump_while(|c| c != '\n');
    }

    /// Skips `/* ... */`. Runs to end of input when the comment is never closed.
    fn skip_block_comment(&mut self) {
        self.cursor.eat("/*");
        while !self.cursor.eat("*/") {
            if self.cursor.is_at_end() {
                trace!("block comment runs to end of input");
                break;
            }
            self.cursor.bump();
        }
    }

    /// String or character literal. A backslash escapes the next character.
    /// Newlines are ordinary content; only end of input leaves it unclosed.
    fn scan_quoted(&mut self, quote: char, start: Position) -> Result<(), LexError> {
        self.cursor.bump();
        loop {
            match self.cursor.peek() {
                None => {
                    return Err(LexError::new(LexErrorKind::UnterminatedLiteral, quote, start));
                }
                Some('\\') => {
                    self.cursor.bump();
                    if self.cursor.bump().is_none() {
                        return Err(LexError::new(LexErrorKind::UnterminatedLiteral, quote, start));
                    }
                }
                Some(c) if c == quote => {
                    self.cursor.bump();
                    break;
                }
                Some(_) => {
                    self.cursor.bump();
                }
            }
        }
        self.push(TokenTag::String, start);
        Ok(())
    }

    /// Longest operator match: three characters, then two, then one.
    fn scan_operator(&mut self, c: char, start: Position) -> Result<(), LexError> {
        let matched = OPERATORS_3
            .iter()
            .chain(OPERATORS_2)
            .find(|op| self.cursor.starts_with(op));

        if let Some(op) = matched {
            self.cursor.eat(op);
        } else if OPERATORS_1.contains(c) {
            self.cursor.bump();
        } else {
            return Err(LexError::new(LexErrorKind::UnexpectedCharacter, c, start));
        }

        self.push(TokenTag::Operator, start);
        Ok(())
    }
}

fn is_horizontal_space(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
