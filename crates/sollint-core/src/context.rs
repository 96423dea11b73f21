//! Context types for rule execution.

use crate::source::SourceFile;
use crate::types::Location;
use std::path::{Path, PathBuf};

/// Byte index of a 1-indexed character column, clamped to the line end.
fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column.saturating_sub(1))
        .map_or(line.len(), |(i, _)| i)
}

/// Context provided to per-file rules.
///
/// Contains the scanned lines of the file plus the path information rules
/// need to report violations.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Scanned file contents.
    pub source: &'a SourceFile,
    /// Path relative to the analyzed root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(source: &'a SourceFile, root: &Path) -> Self {
        let path = source.path();
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            source,
            relative_path,
        }
    }

    /// File name including extension, as used in diagnostics.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.source.file_name()
    }

    /// Builds a location for a 1-indexed line and character column, with
    /// the span covering the rest of that line.
    #[must_use]
    pub fn location(&self, line: usize, column: usize) -> Location {
        let length = self
            .source
            .lines()
            .get(line.saturating_sub(1))
            .map_or(0, |l| l.len() - byte_index(l, column));
        Location::new(self.relative_path.clone(), line, column)
            .with_span(self.offset_for(line, column), length)
    }

    /// Calculates byte offset for a given line and column.
    ///
    /// # Arguments
    ///
    /// * `line` - 1-indexed line number
    /// * `column` - 1-indexed column number, counted in characters
    ///
    /// # Returns
    ///
    /// Byte offset from the start of the file, or 0 if out of bounds.
    #[must_use]
    pub fn offset_for(&self, line: usize, column: usize) -> usize {
        if line == 0 {
            return 0;
        }

        let terminator = self.source.line_ending().len();
        let mut offset = 0;
        for (i, line_content) in self.source.lines().iter().enumerate() {
            if i + 1 == line {
                return offset + byte_index(line_content, column);
            }
            offset += line_content.len() + terminator;
        }

        offset
    }
}
