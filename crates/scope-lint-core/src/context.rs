//! Per-file context for analysis and reporting.

use std::path::{Path, PathBuf};

use crate::lexer::normalize_newlines;

/// A source file prepared for linting.
///
/// Holds the newline-normalized content, which is what token offsets,
/// lines and columns refer to.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// Path relative to the project root, used in reports.
    pub relative_path: PathBuf,
    /// File contents with `\r\n` collapsed to `\n`.
    pub content: String,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
            content: normalize_newlines(content).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(content: &str) -> FileContext<'static> {
        FileContext::new(Path::new("/proj/src/main.c"), content, Path::new("/proj"))
    }

    #[test]
    fn test_relative_path() {
        let ctx = context("");
        assert_eq!(ctx.relative_path, PathBuf::from("src/main.c"));

        let outside = FileContext::new(Path::new("/other/a.c"), "", Path::new("/proj"));
        assert_eq!(outside.relative_path, PathBuf::from("/other/a.c"));
    }

    #[test]
    fn test_content_is_normalized() {
        let ctx = context("a\r\nb\r\n");
        assert_eq!(ctx.content, "a\nb\n");
    }
}
