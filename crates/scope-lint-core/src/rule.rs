//! Rules declared by directives, and the command table that builds them.
//!
//! Adding a rule kind means adding a [`Rule`] variant, a [`RuleKind`], and
//! one [`DirectiveCommand`] entry in [`COMMANDS`]. The lexer is unaffected.

use serde::{Deserialize, Serialize};

use crate::token::{Token, TokenTag};
use crate::types::Severity;

/// Identifies a rule kind independently of any declared instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// `//!unused name[, name]*`
    Unused,
}

impl RuleKind {
    /// Returns the rule name, which is also its directive command.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Unused => "unused",
        }
    }

    /// Returns the rule code (e.g., "SL001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Unused => "SL001",
        }
    }

    /// Returns a brief description of what this rule checks.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Unused => "Forbids any later use of the named identifiers in the declaring scope",
        }
    }

    /// Returns the default severity for violations from this rule.
    #[must_use]
    pub fn default_severity(self) -> Severity {
        Severity::Error
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags identifiers that were declared unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedRule {
    /// Identifier that must not appear.
    pub name: String,
}

impl UnusedRule {
    fn message(token: &Token) -> String {
        format!("Variable '{}' cannot be used.", token.text)
    }
}

/// A rule instance created from one directive argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// See [`UnusedRule`].
    Unused(UnusedRule),
}

impl Rule {
    /// Builds an `unused` rule for `name`.
    #[must_use]
    pub fn unused(name: &str) -> Self {
        Self::Unused(UnusedRule {
            name: name.to_string(),
        })
    }

    /// Returns the kind of this rule.
    #[must_use]
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::Unused(_) => RuleKind::Unused,
        }
    }

    /// Tag a token must carry to trigger this rule.
    #[must_use]
    pub fn match_tag(&self) -> TokenTag {
        match self {
            Self::Unused(_) => TokenTag::Identifier,
        }
    }

    /// Text a token must have to trigger this rule.
    #[must_use]
    pub fn match_text(&self) -> &str {
        match self {
            Self::Unused(rule) => &rule.name,
        }
    }

    /// Returns true if `token` carries the rule's tag and text.
    #[must_use]
    pub fn matches(&self, token: &Token) -> bool {
        token.tag == self.match_tag() && token.text == self.match_text()
    }

    /// Builds the error message for a triggering token.
    #[must_use]
    pub fn message(&self, token: &Token) -> String {
        match self {
            Self::Unused(_) => UnusedRule::message(token),
        }
    }
}

/// Builds a rule from one directive argument.
pub type RuleBuilder = fn(&str) -> Rule;

/// Maps a directive command name to the rule it declares.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveCommand {
    /// Command name as written after `//!`.
    pub name: &'static str,
    /// Kind of rule the command declares.
    pub kind: RuleKind,
    /// Constructor called once per argument.
    pub build: RuleBuilder,
}

/// All recognised directive commands.
pub const COMMANDS: &[DirectiveCommand] = &[DirectiveCommand {
    name: "unused",
    kind: RuleKind::Unused,
    build: Rule::unused,
}];

/// Looks up a directive command by name.
#[must_use]
pub fn lookup_command(name: &str) -> Option<&'static DirectiveCommand> {
    COMMANDS.iter().find(|command| command.name == name)
}
