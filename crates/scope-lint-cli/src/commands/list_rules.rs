//! List rules command implementation.

use scope_lint_core::COMMANDS;

/// Runs the list-rules command.
pub fn run() {
    println!("Available directive commands:\n");
    println!(
        "{:<10} {:<12} {:<10} Description",
        "Code", "Directive", "Severity"
    );
    println!("{}", "-".repeat(80));

    for command in COMMANDS {
        println!(
            "{:<10} {:<12} {:<10} {}",
            command.kind.code(),
            format!("//!{}", command.name),
            command.kind.default_severity().to_string(),
            command.kind.description()
        );
    }

    println!("\nDirectives apply from their line to the end of the enclosing {{ }} scope:");
    println!("  //!unused tmp, scratch");
    println!("\nSeverities can be overridden per rule in scope-lint.toml:");
    println!("  [rules.unused]");
    println!("  severity = \"warning\"");
}
