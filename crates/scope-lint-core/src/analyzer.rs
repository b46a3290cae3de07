//! Analyzer: discovers files and runs lex + validate over each of them.

use crate::config::Config;
use crate::context::FileContext;
use crate::lexer::tokenize;
use crate::types::{LexFailure, LintResult, Location, Violation};
use crate::validator::{validate, ValidationError};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving paths.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path to the file that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),
}

/// Outcome of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path as reported in violations.
    pub path: PathBuf,
    /// Normalized file content.
    pub content: String,
    /// Violations, in token order.
    pub violations: Vec<Violation>,
    /// Set when the file failed to lex; `violations` is then empty.
    pub lex_failure: Option<LexFailure>,
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    paths: Vec<PathBuf>,
    exclude_patterns: Vec<String>,
    extensions: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory. Reported paths are relative to it.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a file or directory to check. Defaults to the root.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Adds multiple files or directories to check.
    #[must_use]
    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds a file extension (without the dot) picked up in directories.
    ///
    /// When none are given, the configured extensions are used.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extensions.push(extension.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined or an
    /// exclude pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let cwd = std::env::current_dir()?;
        let root = absolutize(&cwd, root);
        let paths = self
            .paths
            .into_iter()
            .map(|p| absolutize(&cwd, p))
            .collect();

        // Merge exclude patterns from config
        let exclude = self
            .exclude_patterns
            .iter()
            .chain(&config.analyzer.exclude)
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        let extensions = if self.extensions.is_empty() {
            config.analyzer.extensions.clone()
        } else {
            self.extensions
        };

        Ok(Analyzer {
            root,
            paths,
            exclude,
            extensions,
            config,
        })
    }
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Runs the lexer and validator over a set of files.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    paths: Vec<PathBuf>,
    exclude: Vec<glob::Pattern>,
    extensions: Vec<String>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all discovered files and returns the results.
    ///
    /// A file that fails to lex is recorded in [`LintResult::lex_failures`]
    /// and does not stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for path in &files {
            debug!("Analyzing: {}", path.display());
            let content = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Read {
                path: path.clone(),
                source,
            })?;

            let report = self.analyze_source(path, &content);
            result.files_checked += 1;
            result.violations.extend(report.violations);
            result.lex_failures.extend(report.lex_failure);
            result.sources.insert(report.path, report.content);
        }

        // Stable sort: errors on one token keep declaration order.
        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Analysis complete: {} violations, {} lex failures in {} files",
            result.violations.len(),
            result.lex_failures.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks one file's content without touching the filesystem.
    #[must_use]
    pub fn analyze_source(&self, path: &Path, content: &str) -> FileReport {
        let ctx = FileContext::new(path, content, &self.root);

        let (violations, lex_failure) = match tokenize(&ctx.content) {
            Ok(tokens) => {
                let violations = validate(&tokens)
                    .into_iter()
                    .filter_map(|error| self.to_violation(&ctx.relative_path, error))
                    .collect();
                (violations, None)
            }
            Err(error) => {
                warn!("Failed to tokenize {}: {}", ctx.relative_path.display(), error);
                (Vec::new(), Some(LexFailure::new(ctx.relative_path.clone(), &error)))
            }
        };

        FileReport {
            path: ctx.relative_path,
            content: ctx.content,
            violations,
            lex_failure,
        }
    }

    /// Maps a validation error to a violation, applying rule configuration.
    fn to_violation(&self, file: &Path, error: ValidationError) -> Option<Violation> {
        let name = error.rule.name();
        if !self.config.is_rule_enabled(name) {
            debug!("Skipping disabled rule: {}", name);
            return None;
        }

        let severity = self
            .config
            .rule_severity(name)
            .unwrap_or_else(|| error.rule.default_severity());

        Some(Violation::new(
            error.rule.code(),
            name,
            severity,
            Location::from_token(file.to_path_buf(), &error.token),
            error.message,
        ))
    }

    /// Discovers the files to analyze.
    ///
    /// Explicit file paths are always included; directories are walked and
    /// filtered by extension and exclude patterns.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let targets = if self.paths.is_empty() {
            std::slice::from_ref(&self.root)
        } else {
            self.paths.as_slice()
        };

        let mut files = Vec::new();
        for target in targets {
            if target.is_file() {
                files.push(target.clone());
                continue;
            }

            let mut builder = ignore::WalkBuilder::new(target);
            builder
                .hidden(false)
                .require_git(false)
                .git_ignore(self.config.analyzer.respect_gitignore);

            for entry in builder.build() {
                let entry = entry?;
                let path = entry.path();

                if !path.is_file() || !self.has_checked_extension(path) {
                    continue;
                }

                // Check exclude patterns
                if self.should_exclude(path) {
                    debug!("Excluding: {}", path.display());
                    continue;
                }

                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    fn has_checked_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}
