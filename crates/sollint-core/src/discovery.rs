//! File discovery and the ignore list.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Errors that can occur while discovering files.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Directory walk failed.
    #[error("Failed to walk {root}: {source}")]
    Walk {
        /// Directory being walked.
        root: PathBuf,
        /// Underlying walker error.
        source: ignore::Error,
    },

    /// File name pattern is not a valid glob.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Ignore-list file could not be read.
    #[error("Failed to read ignore list {path}: {source}")]
    IgnoreList {
        /// Path of the ignore-list file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}

/// Recursively finds files under `dir` whose file name matches `pattern`.
///
/// Results are sorted so that reports are stable across runs. A missing
/// `dir` holds no files.
///
/// # Errors
///
/// Returns an error if the pattern is invalid or the walk fails.
pub fn discover_files(
    dir: &Path,
    pattern: &str,
    respect_gitignore: bool,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let pattern = glob::Pattern::new(pattern)?;

    if !dir.exists() {
        warn!("{} does not exist; nothing to scan", dir.display());
        return Ok(Vec::new());
    }

    let mut builder = ignore::WalkBuilder::new(dir);
    builder
        .hidden(false)
        .parents(respect_gitignore)
        .ignore(false)
        .git_ignore(respect_gitignore)
        .git_global(false)
        .git_exclude(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| DiscoveryError::Walk {
            root: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| pattern.matches(n));
        if matches {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    debug!("Discovered {} file(s) under {}", files.len(), dir.display());
    Ok(files)
}

/// Path substrings excluded from contract linting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    entries: Vec<String>,
}

impl IgnoreList {
    /// Reads an ignore list: one entry per line, surrounding whitespace
    /// trimmed, blank lines skipped.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::IgnoreList`] if the file is missing or
    /// unreadable.
    pub fn from_file(path: &Path) -> Result<Self, DiscoveryError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DiscoveryError::IgnoreList {
                path: path.to_path_buf(),
                source: e,
            })?;
        Ok(Self::parse(&content))
    }

    /// Parses ignore-list contents.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self {
            entries: content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Whether any entry is a substring of `path`.
    #[must_use]
    pub fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.entries.iter().any(|e| path_str.contains(e.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_matching_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("protocol/lib");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("Root.sol"), "").unwrap();
        fs::write(nested.join("Math.sol"), "").unwrap();
        fs::write(nested.join("notes.md"), "").unwrap();

        let files = discover_files(tmp.path(), "*.sol", false).unwrap();
        assert_eq!(
            files,
            vec![tmp.path().join("Root.sol"), nested.join("Math.sol")]
        );
    }

    #[test]
    fn missing_directory_has_no_files() {
        let tmp = tempfile::tempdir().unwrap();
        let files = discover_files(&tmp.path().join("test"), "*.js", false).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = discover_files(tmp.path(), "[", false).unwrap_err();
        assert!(matches!(err, DiscoveryError::Pattern(_)));
    }

    #[test]
    fn ignore_list_skips_blank_lines() {
        let list = IgnoreList::parse("contracts/testing\n\n   \nMigrations.sol\n");
        assert_eq!(list.len(), 2);
        assert!(list.is_ignored(Path::new("/repo/contracts/testing/TestToken.sol")));
        assert!(list.is_ignored(Path::new("/repo/contracts/Migrations.sol")));
        assert!(!list.is_ignored(Path::new("/repo/contracts/protocol/Admin.sol")));
    }

    #[test]
    fn empty_ignore_list_ignores_nothing() {
        let list = IgnoreList::parse("\n\n");
        assert!(list.is_empty());
        assert!(!list.is_ignored(Path::new("/repo/contracts/A.sol")));
    }

    #[test]
    fn missing_ignore_list_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = IgnoreList::from_file(&tmp.path().join(".soliumignore")).unwrap_err();
        assert!(matches!(err, DiscoveryError::IgnoreList { .. }));
    }
}
