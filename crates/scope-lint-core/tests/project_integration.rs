//! Integration test: directive rules end-to-end via Analyzer.
//!
//! Uses the fixture tree under `tests/fixtures/project/` to verify that
//! discovery, lexing, validation and reporting work together.

use scope_lint_core::{render_violation, Analyzer, Config, LexErrorKind, Severity};
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn analyze_fixture(config: Config) -> scope_lint_core::LintResult {
    Analyzer::builder()
        .root(fixture_root())
        .exclude("**/build/**")
        .config(config)
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

// ── Discovery ──

#[test]
fn checks_sources_and_skips_excluded_and_foreign_files() {
    let result = analyze_fixture(Config::default());

    assert_eq!(result.files_checked, 3);
    let mut files: Vec<&Path> = result.sources.keys().map(PathBuf::as_path).collect();
    files.sort();
    assert_eq!(
        files,
        vec![
            Path::new("src/broken.c"),
            Path::new("src/main.c"),
            Path::new("src/util.h")
        ]
    );
}

#[test]
fn explicit_file_is_checked_regardless_of_extension() {
    let root = fixture_root();
    let result = Analyzer::builder()
        .root(&root)
        .path(root.join("docs/notes.txt"))
        .build()
        .unwrap()
        .analyze()
        .unwrap();

    assert_eq!(result.files_checked, 1);
    assert_eq!(result.lex_failures.len(), 1);
    assert_eq!(result.lex_failures[0].character, '@');
}

#[test]
fn gitignore_is_respected_unless_disabled() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(tmp.path().join(".gitignore"), "generated.c\n").unwrap();
    std::fs::write(tmp.path().join("kept.c"), "//!unused a\r\na;\r\n").unwrap();
    std::fs::write(tmp.path().join("generated.c"), "//!unused b\nb;\n").unwrap();

    let run = |config: Config| {
        Analyzer::builder()
            .root(tmp.path())
            .config(config)
            .build()
            .unwrap()
            .analyze()
            .unwrap()
    };

    let result = run(Config::default());
    assert_eq!(result.files_checked, 1);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].location.file, PathBuf::from("kept.c"));
    assert_eq!(result.source(Path::new("kept.c")), Some("//!unused a\na;\n"));

    let config = Config::parse("[analyzer]\nrespect_gitignore = false\n").unwrap();
    let result = run(config);
    assert_eq!(result.files_checked, 2);
    assert_eq!(result.violations.len(), 2);
}

// ── Validation ──

#[test]
fn reports_scoped_unused_violations() {
    let result = analyze_fixture(Config::default());

    let found: Vec<(String, usize, usize)> = result
        .violations
        .iter()
        .map(|v| {
            (
                v.location.file.display().to_string(),
                v.location.line,
                v.location.column,
            )
        })
        .collect();

    assert_eq!(
        found,
        vec![
            ("src/main.c".to_string(), 10, 12),
            ("src/main.c".to_string(), 12, 2),
            ("src/main.c".to_string(), 17, 15),
        ],
        "{:#?}",
        result.violations
    );
    assert!(result.violations.iter().all(|v| v.code == "SL001"));
    assert_eq!(
        result.violations[0].message,
        "Variable 'tmp' cannot be used."
    );
    assert_eq!(
        result.violations[2].message,
        "Variable 'legacy_flag' cannot be used."
    );
}

#[test]
fn lex_failure_is_recorded_per_file() {
    let result = analyze_fixture(Config::default());

    assert_eq!(result.lex_failures.len(), 1);
    let failure = &result.lex_failures[0];
    assert_eq!(failure.location.file, PathBuf::from("src/broken.c"));
    assert_eq!((failure.location.line, failure.location.column), (2, 11));
    assert_eq!(failure.kind, LexErrorKind::UnexpectedCharacter);
    assert!(result.has_errors());
}

#[test]
fn severity_override_and_fail_threshold() {
    let config = Config::parse("fail_on = \"warning\"\n[rules.unused]\nseverity = \"info\"\n")
        .expect("config should parse");
    let fail_on = config.fail_on_severity();
    let result = analyze_fixture(config);

    assert!(result.violations.iter().all(|v| v.severity == Severity::Info));
    assert_eq!(result.count_by_severity(), (0, 0, 3));
    // broken.c still fails the run.
    assert!(result.has_violations_at(fail_on));
}

// ── Reporting ──

#[test]
fn renders_snippet_from_recorded_source() {
    let result = analyze_fixture(Config::default());
    let violation = &result.violations[0];
    let line = result.source_line(&violation.location.file, violation.location.line);

    let rendered = render_violation(violation, line);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "src/main.c:10:12: Variable 'tmp' cannot be used.");
    assert_eq!(lines[1], "src/main.c:10:12: note:   total += tmp;");
    assert_eq!(lines[2], "src/main.c:10:12: note:            ^");
}
