//! Core types for lint violations and results.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::lexer::{LexError, LexErrorKind};
use crate::token::Token;

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in the normalized file content.
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a location covering a token.
    #[must_use]
    pub fn from_token(file: PathBuf, token: &Token) -> Self {
        Self::new(file, token.line, token.column).with_span(token.offset, token.text.len())
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A lint violation found during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "SL001").
    pub code: String,
    /// Rule name (e.g., "unused").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Location of the offending token.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
        }
    }

    /// Formats the violation as a `file:line:column: message` line.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{}:{}:{}: {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.message
        )
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: Some(format!(
                "declared by a `//!{}` directive in an enclosing scope",
                v.rule
            )),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.rule.clone(),
        }
    }
}

/// A file that could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexFailure {
    /// Where lexing stopped.
    pub location: Location,
    /// Failure category.
    pub kind: LexErrorKind,
    /// The offending character.
    pub character: char,
    /// Human-readable message.
    pub message: String,
}

impl LexFailure {
    /// Records a lex error for `file`.
    #[must_use]
    pub fn new(file: PathBuf, error: &LexError) -> Self {
        Self {
            location: Location::new(file, error.line, error.column)
                .with_span(error.span.offset(), error.span.len()),
            kind: error.kind,
            character: error.character,
            message: error.to_string(),
        }
    }

    /// Rebuilds the diagnostic for rendering against the file's source.
    #[must_use]
    pub fn to_error(&self) -> LexError {
        LexError {
            kind: self.kind,
            character: self.character,
            line: self.location.line,
            column: self.location.column,
            span: SourceSpan::from((self.location.offset, self.location.length)),
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Files that failed to tokenize. Their rules were never checked.
    pub lex_failures: Vec<LexFailure>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Normalized content of each checked file, keyed by reported path.
    #[serde(skip)]
    pub sources: BTreeMap<PathBuf, String>,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors, including lex failures.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Returns true if any file failed to lex or any violation meets the
    /// given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        !self.lex_failures.is_empty() || self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity: Severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Returns the normalized source of a checked file.
    #[must_use]
    pub fn source(&self, file: &std::path::Path) -> Option<&str> {
        self.sources.get(file).map(String::as_str)
    }

    /// Returns one line (1-indexed) of a checked file, without its newline.
    #[must_use]
    pub fn source_line(&self, file: &std::path::Path, line: usize) -> Option<&str> {
        let index = line.checked_sub(1)?;
        self.source(file)?.split('\n').nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "SL001",
            "unused",
            severity,
            Location::new(PathBuf::from("src/main.c"), 42, 10),
            "Variable 'x' cannot be used.",
        )
    }

    #[test]
    fn violation_format_is_file_line_column_message() {
        let v = make_violation(Severity::Error);
        assert_eq!(v.format(), "src/main.c:42:10: Variable 'x' cannot be used.");
    }

    #[test]
    fn violation_display_includes_code_and_severity() {
        let v = make_violation(Severity::Warning);
        assert_eq!(
            v.to_string(),
            "src/main.c:42:10: warning [SL001] Variable 'x' cannot be used."
        );
    }

    #[test]
    fn location_from_token_covers_token_text() {
        let tokens = tokenize("int value;").unwrap();
        let location = Location::from_token(PathBuf::from("a.c"), &tokens[1]);
        assert_eq!((location.line, location.column), (1, 5));
        assert_eq!((location.offset, location.length), (4, 5));
    }

    #[test]
    fn lex_failure_round_trips_error() {
        let error = tokenize("a $").unwrap_err();
        let failure = LexFailure::new(PathBuf::from("a.c"), &error);
        assert_eq!(failure.location.column, 3);
        assert_eq!(failure.message, "unexpected character '$' at 1:3");
        assert_eq!(failure.to_error(), error);
    }

    #[test]
    fn has_violations_at_respects_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(result.has_violations_at(Severity::Warning));
        assert!(!result.has_errors());
    }

    #[test]
    fn lex_failure_always_fails() {
        let mut result = LintResult::new();
        let error = tokenize("@").unwrap_err();
        result
            .lex_failures
            .push(LexFailure::new(PathBuf::from("a.c"), &error));
        assert!(result.has_errors());
        assert!(result.has_violations_at(Severity::Error));
    }

    #[test]
    fn count_and_source_lines() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Error));
        result.violations.push(make_violation(Severity::Info));
        result
            .sources
            .insert(PathBuf::from("b.c"), "int b;\n\tb++;\n".to_string());

        assert_eq!(result.count_by_severity(), (1, 0, 1));
        let file = std::path::Path::new("b.c");
        assert_eq!(result.source(file), Some("int b;\n\tb++;\n"));
        assert_eq!(result.source_line(file, 2), Some("\tb++;"));
        assert_eq!(result.source_line(file, 0), None);
        assert_eq!(result.source_line(file, 9), None);
        assert_eq!(result.source_line(std::path::Path::new("c.c"), 1), None);
    }
}
