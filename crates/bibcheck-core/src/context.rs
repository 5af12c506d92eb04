//! Context types for document analysis.

use std::path::{Path, PathBuf};

/// Context for one document being checked.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Path of the document (or the caller-supplied name).
    pub path: &'a Path,
    /// Document contents.
    pub content: &'a str,
    /// Path relative to the analysis root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Builds the line index of this document.
    #[must_use]
    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(self.content)
    }
}

/// Byte offsets of line starts, for turning offsets into positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Indexes the line starts of `content`.
    #[must_use]
    pub fn new(content: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    /// Returns the 1-indexed line and column (in bytes) of `offset`.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        if self.line_starts.is_empty() {
            return (1, offset + 1);
        }
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        (line.max(1), offset - line_start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let ctx = FileContext::new(
            Path::new("/papers/ipac/main.tex"),
            "",
            Path::new("/papers"),
        );
        assert_eq!(ctx.relative_path, PathBuf::from("ipac/main.tex"));
    }

    #[test]
    fn test_relative_path_of_root_file() {
        let ctx = FileContext::new(Path::new("main.tex"), "", Path::new("main.tex"));
        assert_eq!(ctx.relative_path, PathBuf::from("main.tex"));
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("line1\nline2\nline3");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(5), (1, 6));
        assert_eq!(index.line_col(6), (2, 1));
        assert_eq!(index.line_col(8), (2, 3));
    }
}
