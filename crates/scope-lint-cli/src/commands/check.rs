//! Check command implementation.

use anyhow::{Context, Result};
use scope_lint_core::{Analyzer, Config};
use std::path::PathBuf;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    paths: &[PathBuf],
    format: OutputFormat,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = load_config(source)?;

    let analyzer = Analyzer::builder()
        .paths(paths.iter().cloned())
        .excludes(exclude)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Checking {} path(s) under {}",
        paths.len(),
        analyzer.root().display()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format)?;

    if result.has_violations_at(analyzer.config().fail_on_severity()) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(path) = source.path() else {
        return Ok(Config::default());
    };

    if source.is_global() {
        tracing::info!("Using global config: {}", path.display());
    } else {
        tracing::info!("Using config: {}", path.display());
    }

    Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
}
