//! Plain-text rendering of a violation with its source line and a caret.

use std::fmt::Write;

use crate::types::Violation;

/// Renders a violation as three lines:
///
/// ```text
/// src/main.c:3:7: Variable 'x' cannot be used.
/// src/main.c:3:7: note:   int x;
/// src/main.c:3:7: note:       ^
/// ```
///
/// Tabs in the echoed line become single spaces so the caret lines up with
/// the character-based column. `source_line` is `None` when the text is not
/// available; the note lines are then omitted.
#[must_use]
pub fn render_violation(violation: &Violation, source_line: Option<&str>) -> String {
    let location = &violation.location;
    let prefix = format!(
        "{}:{}:{}: ",
        location.file.display(),
        location.line,
        location.column
    );

    let mut out = String::new();
    let _ = writeln!(out, "{}", violation.format());
    if let Some(line) = source_line {
        let _ = writeln!(out, "{prefix}note: {}", line.replace('\t', " "));
        let pad = " ".repeat(location.column.saturating_sub(1));
        let _ = writeln!(out, "{prefix}note: {pad}^");
    }
    out
}
