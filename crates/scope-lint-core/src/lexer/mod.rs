//! Lexer for C-like sources.
//!
//! Recognition order at every position (first match wins):
//!
//! 1. `#...` preprocessor line
//! 2. `//!...` directive line
//! 3. `//...` line comment (skipped)
//! 4. `/* ... */` block comment (skipped, may run to end of input)
//! 5. newline and horizontal whitespace (skipped)
//! 6. identifier, number, string/character literal
//! 7. operator, longest match first
//!
//! Anything else is a [`LexError`].

mod cursor;
mod scanner;

use std::borrow::Cow;

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::token::{Position, Token};
use scanner::Scanner;

/// What went wrong while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LexErrorKind {
    /// No token pattern starts with this character.
    UnexpectedCharacter,
    /// A string or character literal is still open at end of input.
    UnterminatedLiteral,
}

impl std::fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter => write!(f, "unexpected character"),
            Self::UnterminatedLiteral => write!(f, "unterminated literal starting with"),
        }
    }
}

/// Lexing failure. Fatal for the file being lexed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} {character:?} at {line}:{column}")]
#[diagnostic(code(scope_lint::lex))]
pub struct LexError {
    /// Failure category.
    pub kind: LexErrorKind,
    /// The offending character.
    pub character: char,
    /// Line of the offending character (1-indexed).
    pub line: usize,
    /// Column of the offending character (1-indexed).
    pub column: usize,
    /// Span of the offending character in the normalized source.
    #[label("here")]
    pub span: SourceSpan,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, character: char, at: Position) -> Self {
        Self {
            kind,
            character,
            line: at.line,
            column: at.column,
            span: SourceSpan::from((at.offset, character.len_utf8())),
        }
    }
}

/// Collapses `\r\n` line endings to `\n`.
///
/// Token offsets refer to the normalized text, so callers that render
/// source snippets should keep the returned string.
#[must_use]
pub fn normalize_newlines(source: &str) -> Cow<'_, str> {
    if source.contains("\r\n") {
        Cow::Owned(source.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

/// Converts source text into tokens.
///
/// Either the whole source lexes or the first failure is returned; no partial
/// token list is surfaced.
///
/// # Errors
///
/// Returns a [`LexError`] at the first character no token pattern accepts.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let source = normalize_newlines(source);
    let tokens = Scanner::new(&source).scan()?;
    debug!("Tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}
