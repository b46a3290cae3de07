//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# scope-lint configuration

# Severity at or above which `scope-lint check` exits non-zero.
# Files that fail to tokenize always fail the run.
fail_on = "error"

[analyzer]
# Root directory reported paths are relative to (default: current directory)
# root = "."

# File extensions checked when walking directories
extensions = ["c", "h", "cc", "cpp", "cxx", "hh", "hpp"]

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/vendor/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Disabled rules still parse their directives but report nothing.

[rules.unused]
enabled = true
# severity = "warning"  # Override default severity
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("scope-lint.toml"), force)?;

    println!("Created scope-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit scope-lint.toml to configure rules");
    println!("  2. Run: scope-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
