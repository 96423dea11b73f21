//! Line scanner: reads a source file into an ordered sequence of lines.
//!
//! Every rule and rewriter works on a [`SourceFile`]. Lines are stored
//! without their terminators. One terminator style is kept per file, plus
//! whether the file ended in a newline, so a file with consistent endings
//! round-trips byte for byte through [`SourceFile::to_text`].
//!
//! A file that mixes `\n` and `\r\n` is written back with `\r\n` on every
//! line. Callers only write files whose lines they changed, so untouched
//! files keep their mixed endings on disk.

use std::path::{Path, PathBuf};

/// Errors raised while reading or writing a source file.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// An in-memory text file split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    lines: Vec<String>,
    line_ending: &'static str,
    trailing_newline: bool,
}

impl SourceFile {
    /// Reads a file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Read`] if the file cannot be read as UTF-8 text.
    pub fn read(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let text = std::fs::read_to_string(&path).map_err(|e| SourceError::Read {
            path: path.clone(),
            source: e,
        })?;
        Ok(Self::from_text(path, &text))
    }

    /// Builds a source file from text already in memory.
    ///
    /// The file is treated as CRLF if any line ends in `\r\n`.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        let line_ending = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self {
            path: path.into(),
            lines: text.lines().map(String::from).collect(),
            line_ending,
            trailing_newline: text.ends_with('\n'),
        }
    }

    /// Returns a copy of this file with its lines replaced.
    #[must_use]
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            path: self.path.clone(),
            lines,
            line_ending: self.line_ending,
            trailing_newline: self.trailing_newline || self.lines.is_empty(),
        }
    }

    /// Path the file was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including extension (e.g. `Admin.sol`).
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name with the extension removed (e.g. `Admin`).
    #[must_use]
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// All lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line terminator used when writing (`\n` or `\r\n`).
    #[must_use]
    pub fn line_ending(&self) -> &'static str {
        self.line_ending
    }

    /// Whether any line equals `expected` exactly.
    #[must_use]
    pub fn contains_line(&self, expected: &str) -> bool {
        self.lines.iter().any(|l| l == expected)
    }

    /// Reassembles the file contents.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join(self.line_ending);
        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(self.line_ending);
        }
        text
    }

    /// Writes the file back to its path.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Write`] if the file cannot be written.
    pub fn write(&self) -> Result<(), SourceError> {
        std::fs::write(&self.path, self.to_text()).map_err(|e| SourceError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Length in bytes of the leading whitespace of `line`.
#[must_use]
pub fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
