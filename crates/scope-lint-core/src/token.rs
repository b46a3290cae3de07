//! Token types produced by the lexer.

use serde::{Deserialize, Serialize};

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenTag {
    /// A `#` line such as `#include <stdio.h>`.
    Preprocessor,
    /// A `//!` validator directive; the text excludes the marker.
    Directive,
    /// Keywords and identifiers.
    Identifier,
    /// Decimal integer literal.
    Number,
    /// String or character literal, quotes included.
    String,
    /// Operators and punctuation.
    Operator,
}

impl std::fmt::Display for TokenTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preprocessor => write!(f, "preprocessor"),
            Self::Directive => write!(f, "directive"),
            Self::Identifier => write!(f, "identifier"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Operator => write!(f, "operator"),
        }
    }
}

/// A point in the (newline-normalized) source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in characters (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the source.
    pub offset: usize,
}

impl Position {
    /// The position of the first character of a source.
    pub const START: Self = Self {
        line: 1,
        column: 1,
        offset: 0,
    };
}

/// One lexical unit of the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Lexical category.
    pub tag: TokenTag,
    /// Matched text. For directives, the body after `//!`.
    pub text: String,
    /// Line of the first character (1-indexed).
    pub line: usize,
    /// Column of the first character (1-indexed).
    pub column: usize,
    /// Byte offset of the first character.
    pub offset: usize,
}

impl Token {
    /// Creates a token starting at `start`.
    #[must_use]
    pub fn new(tag: TokenTag, text: impl Into<String>, start: Position) -> Self {
        Self {
            tag,
            text: text.into(),
            line: start.line,
            column: start.column,
            offset: start.offset,
        }
    }

    /// Returns where this token starts.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// Returns true if the token text is exactly `text`.
    #[must_use]
    pub fn is(&self, text: &str) -> bool {
        self.text == text
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {} {:?}",
            self.line, self.column, self.tag, self.text
        )
    }
}
