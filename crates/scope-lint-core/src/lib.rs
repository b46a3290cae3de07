//! # scope-lint-core
//!
//! Core engine for scope-lint, a directive-driven linter for C-like sources.
//!
//! Source text goes through two stages:
//!
//! - [`tokenize`] turns text into a flat list of position-tagged [`Token`]s
//! - [`validate`] walks the tokens, tracking brace scopes and the rules
//!   declared by `//!` directives, and reports every token a rule forbids
//!
//! The [`Analyzer`] wraps both stages for files on disk and turns
//! [`ValidationError`]s into [`Violation`]s carrying rule code and severity.
//!
//! ## Example
//!
//! ```
//! use scope_lint_core::{tokenize, validate};
//!
//! let source = "//!unused x\n{\n  int x;\n}\n";
//! let tokens = tokenize(source)?;
//! let errors = validate(&tokens);
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].message, "Variable 'x' cannot be used.");
//! assert_eq!((errors[0].token.line, errors[0].token.column), (3, 7));
//! # Ok::<(), scope_lint_core::LexError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod directive;
mod lexer;
mod report;
mod rule;
mod token;
mod types;
mod validator;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, FileReport};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use directive::Directive;
pub use lexer::{normalize_newlines, tokenize, LexError, LexErrorKind};
pub use report::render_violation;
pub use rule::{lookup_command, DirectiveCommand, Rule, RuleKind, UnusedRule, COMMANDS};
pub use token::{Position, Token, TokenTag};
pub use types::{LexFailure, LintResult, Location, Severity, Violation, ViolationDiagnostic};
pub use validator::{validate, ValidationError};
