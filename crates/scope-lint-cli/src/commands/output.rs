//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{GraphicalReportHandler, NamedSource, Report};
use scope_lint_core::{render_violation, LexFailure, LintResult, Location, ViolationDiagnostic};
use std::fmt::Write;

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", render_text(result));
            print_summary(result);
        }
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Fancy => {
            print!("{}", render_fancy(result)?);
            print_summary(result);
        }
    }
    Ok(())
}

fn lex_failure_line(failure: &LexFailure) -> String {
    format!(
        "{}:{}:{}: {} {:?}",
        failure.location.file.display(),
        failure.location.line,
        failure.location.column,
        failure.kind,
        failure.character
    )
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    if !result.lex_failures.is_empty() {
        out.push_str("ERROR: tokenize was failed\n");
        for failure in &result.lex_failures {
            let _ = writeln!(out, "{}", lex_failure_line(failure));
        }
    }

    if !result.violations.is_empty() {
        out.push_str("ERROR: validate was failed\n");
        for violation in &result.violations {
            let location = &violation.location;
            out.push_str(&render_violation(
                violation,
                result.source_line(&location.file, location.line),
            ));
        }
    }

    out
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for failure in &result.lex_failures {
        let _ = writeln!(out, "{}", lex_failure_line(failure));
    }
    for violation in &result.violations {
        let _ = writeln!(out, "{violation}");
    }
    out
}

fn render_fancy(result: &LintResult) -> Result<String> {
    let handler = GraphicalReportHandler::new();
    let mut out = String::new();

    let named = |location: &Location| {
        NamedSource::new(
            location.file.display().to_string(),
            result.source(&location.file).unwrap_or_default().to_string(),
        )
    };

    for failure in &result.lex_failures {
        let report = Report::new(failure.to_error()).with_source_code(named(&failure.location));
        handler.render_report(&mut out, &*report)?;
    }
    for violation in &result.violations {
        let report = Report::new(ViolationDiagnostic::from(violation))
            .with_source_code(named(&violation.location));
        handler.render_report(&mut out, &*report)?;
    }

    Ok(out)
}

fn summary(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    format!(
        "Found {} lex failure(s), {} error(s), {} warning(s), {} info(s) in {} file(s)",
        result.lex_failures.len(),
        errors,
        warnings,
        infos,
        result.files_checked
    )
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, _) = result.count_by_severity();

    let summary_color = if errors > 0 || !result.lex_failures.is_empty() {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!("\n{}{}\x1b[0m", summary_color, summary(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use scope_lint_core::{tokenize, Severity, Violation};
    use std::path::PathBuf;

    fn sample_result() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 2;

        let violation_location = Location::new(PathBuf::from("src/main.c"), 3, 6).with_span(19, 1);
        result.violations.push(Violation::new(
            "SL001",
            "unused",
            Severity::Error,
            violation_location,
            "Variable 'x' cannot be used.",
        ));
        result.sources.insert(
            PathBuf::from("src/main.c"),
            "//!unused x\n{\n\tint x;\n}\n".to_string(),
        );

        let source = "int a;\n@\n";
        let error = tokenize(source).unwrap_err();
        result
            .lex_failures
            .push(LexFailure::new(PathBuf::from("src/bad.c"), &error));
        result
            .sources
            .insert(PathBuf::from("src/bad.c"), source.to_string());

        result
    }

    #[test]
    fn text_lists_lex_failures_then_report_blocks() {
        let rendered = render_text(&sample_result());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ERROR: tokenize was failed",
                "src/bad.c:2:1: unexpected character '@'",
                "ERROR: validate was failed",
                "src/main.c:3:6: Variable 'x' cannot be used.",
                "src/main.c:3:6: note:  int x;",
                "src/main.c:3:6: note:      ^",
            ]
        );
    }

    #[test]
    fn text_is_empty_for_clean_result() {
        let mut result = LintResult::new();
        result.files_checked = 4;
        assert_eq!(render_text(&result), "");
        assert_eq!(
            summary(&result),
            "Found 0 lex failure(s), 0 error(s), 0 warning(s), 0 info(s) in 4 file(s)"
        );
    }

    #[test]
    fn compact_is_one_line_per_finding() {
        let rendered = render_compact(&sample_result());
        assert_eq!(
            rendered,
            "src/bad.c:2:1: unexpected character '@'\n\
             src/main.c:3:6: error [SL001] Variable 'x' cannot be used.\n"
        );
    }

    #[test]
    fn fancy_mentions_file_and_message() {
        let rendered = render_fancy(&sample_result()).unwrap();
        assert!(rendered.contains("src/main.c"));
        assert!(rendered.contains("Variable 'x' cannot be used."));
        assert!(rendered.contains("src/bad.c"));
    }

    #[test]
    fn json_skips_sources() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["files_checked"], 2);
        assert_eq!(json["violations"][0]["code"], "SL001");
        assert_eq!(json["lex_failures"][0]["kind"], "unexpected-character");
        assert!(json.get("sources").is_none());
    }
}
