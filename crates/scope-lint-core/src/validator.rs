//! Scope validator: applies directive rules to the token stream.

use tracing::{debug, trace};

use crate::directive::Directive;
use crate::rule::{lookup_command, Rule, RuleKind};
use crate::token::{Position, Token, TokenTag};

/// A token that triggered an active rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Message built by the rule.
    pub message: String,
    /// The offending token (not the declaring directive).
    pub token: Token,
    /// Kind of the rule that fired.
    pub rule: RuleKind,
    /// Position of the directive that declared the rule.
    pub declared_at: Position,
}

/// A rule together with the directive position that declared it.
#[derive(Debug)]
struct Declared {
    rule: Rule,
    at: Position,
}

/// Rules declared at one brace depth.
#[derive(Debug)]
struct Scope {
    depth: isize,
    rules: Vec<Declared>,
}

/// Brace depth plus the rules declared in each open scope.
///
/// Scopes are only materialised for depths that declared rules, so the stack
/// stays sorted by depth, and by declaration order, from bottom to top.
#[derive(Debug, Default)]
struct ScopeStack {
    depth: isize,
    scopes: Vec<Scope>,
}

impl ScopeStack {
    fn enter(&mut self) {
        self.depth += 1;
    }

    /// Leaves a scope, dropping rules declared deeper than the new depth.
    ///
    /// Depth may go negative on unbalanced input.
    fn exit(&mut self) {
        self.depth -= 1;
        while self.scopes.last().is_some_and(|s| s.depth > self.depth) {
            if let Some(scope) = self.scopes.pop() {
                debug!(
                    "Dropping {} rule(s) declared at depth {}",
                    scope.rules.len(),
                    scope.depth
                );
            }
        }
    }

    fn declare(&mut self, rule: Rule, at: Position) {
        debug!(
            "Declared {} rule for '{}' at depth {}",
            rule.kind(),
            rule.match_text(),
            self.depth
        );
        let rule = Declared { rule, at };
        match self.scopes.last_mut() {
            Some(scope) if scope.depth == self.depth => scope.rules.push(rule),
            _ => self.scopes.push(Scope {
                depth: self.depth,
                rules: vec![rule],
            }),
        }
    }

    /// Active rules in declaration order.
    fn active(&self) -> impl Iterator<Item = &Declared> {
        self.scopes.iter().flat_map(|scope| scope.rules.iter())
    }
}

/// Checks every token against the rules active at its position.
///
/// Never fails: unknown directive commands are ignored and unbalanced braces
/// simply drive the depth negative. Errors come out in token order; a token
/// matching several rules yields one error per rule, in declaration order.
#[must_use]
pub fn validate(tokens: &[Token]) -> Vec<ValidationError> {
    let mut stack = ScopeStack::default();
    let mut errors = Vec::new();

    for token in tokens {
        if token.is("{") {
            stack.enter();
        } else if token.is("}") {
            stack.exit();
        } else if token.tag == TokenTag::Directive {
            declare_rules(&mut stack, token);
        } else {
            errors.extend(
                stack
                    .active()
                    .filter(|declared| declared.rule.matches(token))
                    .map(|declared| ValidationError {
                        message: declared.rule.message(token),
                        token: token.clone(),
                        rule: declared.rule.kind(),
                        declared_at: declared.at,
                    }),
            );
        }
    }

    debug!("Validated {} tokens: {} error(s)", tokens.len(), errors.len());
    errors
}

fn declare_rules(stack: &mut ScopeStack, token: &Token) {
    let Some(directive) = Directive::parse(&token.text) else {
        trace!("Ignoring malformed directive at {}:{}", token.line, token.column);
        return;
    };
    let Some(command) = lookup_command(directive.command) else {
        trace!("Ignoring unknown directive command '{}'", directive.command);
        return;
    };
    for arg in directive.args {
        stack.declare((command.build)(arg), token.position());
    }
}
