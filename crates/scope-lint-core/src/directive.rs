//! Directive body grammar.
//!
//! A directive is a `//!` comment line. Its body reads:
//!
//! ```text
//! <command> <arg>[, <arg>]*
//! ```
//!
//! The command is separated from the first argument by one or more spaces or
//! tabs. Arguments are split on commas; whitespace around each is trimmed.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIRECTIVE: Regex =
        Regex::new(r"^(?P<command>\S+)[ \t]+(?P<args>.*)$").expect("directive pattern is valid");
    static ref ARG_SEPARATOR: Regex = Regex::new(r"\s*,\s*").expect("separator pattern is valid");
}

/// A parsed directive body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Command name, e.g. `unused`.
    pub command: &'a str,
    /// Arguments in source order, trimmed, empty entries removed.
    pub args: Vec<&'a str>,
}

impl<'a> Directive<'a> {
    /// Parses a directive body (the text after `//!`).
    ///
    /// Returns `None` when the body has no command, or no whitespace between
    /// the command and its arguments.
    #[must_use]
    pub fn parse(body: &'a str) -> Option<Self> {
        let caps = DIRECTIVE.captures(body)?;
        let command = caps.name("command")?.as_str();
        let args = ARG_SEPARATOR
            .split(caps.name("args")?.as_str())
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .collect();

        Some(Self { command, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_argument() {
        let directive = Directive::parse("unused x").unwrap();
        assert_eq!(directive.command, "unused");
        assert_eq!(directive.args, vec!["x"]);
    }

    #[test]
    fn test_comma_separated_arguments() {
        let directive = Directive::parse("unused a,b ,  c\t,d  ").unwrap();
        assert_eq!(directive.args, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_tab_separates_command() {
        let directive = Directive::parse("unused\t\tvalue").unwrap();
        assert_eq!(directive.command, "unused");
        assert_eq!(directive.args, vec!["value"]);
    }

    #[test]
    fn test_empty_entries_are_dropped() {
        let directive = Directive::parse("unused a,,b,").unwrap();
        assert_eq!(directive.args, vec!["a", "b"]);
    }

    #[test]
    fn test_command_without_arguments_is_rejected() {
        assert!(Directive::parse("unused").is_none());
        assert!(Directive::parse("").is_none());
    }

    #[test]
    fn test_leading_whitespace_has_no_command() {
        assert!(Directive::parse(" unused x").is_none());
    }

    #[test]
    fn test_unknown_command_still_parses() {
        let directive = Directive::parse("frobnicate p, q").unwrap();
        assert_eq!(directive.command, "frobnicate");
        assert_eq!(directive.args, vec!["p", "q"]);
    }
}
