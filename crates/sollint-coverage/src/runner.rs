//! Walks the contracts tree and rewrites each file for a coverage run.

use crate::locator::StatementError;
use crate::neutralize::neutralize_assertions;
use crate::precondition::{rewriter_for, PreconditionRewriter};
use sollint_core::{
    discover_files, AnalyzerConfig, Config, DiscoveryError, SourceError, SourceFile,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors that stop a coverage rewrite.
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    /// Reading or writing a file failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Walking the contracts tree failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A statement in the file could not be scanned. The file was left
    /// untouched.
    #[error("{path}: {source}")]
    Statement {
        /// File being rewritten.
        path: PathBuf,
        /// What went wrong.
        source: StatementError,
    },

    /// The working directory could not be resolved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Totals from one coverage run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Files scanned.
    pub files: usize,
    /// Files written back because something changed.
    pub files_changed: Vec<PathBuf>,
    /// Assertions wrapped in comments.
    pub asserts_hidden: usize,
    /// Precondition calls rewritten.
    pub preconditions_fixed: usize,
}

impl CoverageReport {
    /// Summary line for hidden assertions.
    #[must_use]
    pub fn asserts_line(&self) -> String {
        format!("{} asserts hidden.", self.asserts_hidden)
    }

    /// Summary line for rewritten preconditions.
    #[must_use]
    pub fn preconditions_line(&self) -> String {
        format!("{} require()s fixed.", self.preconditions_fixed)
    }
}

/// What one file's rewrite produced.
#[derive(Debug)]
struct FileOutcome {
    lines: Vec<String>,
    asserts: usize,
    preconditions: usize,
}

/// Rewrites every contract source under a root directory.
///
/// Each file is read whole, rewritten in memory (assertions first, then
/// preconditions) and written back in one call only if it changed.
pub struct CoverageRunner {
    root: PathBuf,
    pattern: String,
    respect_gitignore: bool,
    rewriter: Option<Box<dyn PreconditionRewriter>>,
}

impl CoverageRunner {
    /// Creates a runner that only hides assertions.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = AnalyzerConfig::default();
        Self {
            root: root.into(),
            pattern: defaults.contract_pattern,
            respect_gitignore: defaults.respect_gitignore,
            rewriter: None,
        }
    }

    /// Creates a runner from configuration: `<root>/<contracts_dir>`, the
    /// contract pattern and the configured precondition style.
    ///
    /// # Errors
    ///
    /// Returns an error if a relative root cannot be resolved against the
    /// working directory.
    pub fn from_config(config: &Config) -> Result<Self, CoverageError> {
        let root = config.analyzer.root.join(&config.analyzer.contracts_dir);
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(root)
        };

        Ok(Self {
            root,
            pattern: config.analyzer.contract_pattern.clone(),
            respect_gitignore: config.analyzer.respect_gitignore,
            rewriter: Some(rewriter_for(config.coverage.precondition_style)),
        })
    }

    /// Sets the file name pattern.
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Sets or clears the precondition rewriter.
    #[must_use]
    pub fn rewriter(mut self, rewriter: Option<Box<dyn PreconditionRewriter>>) -> Self {
        self.rewriter = rewriter;
        self
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rewrites every matching file.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be read, scanned or written.
    /// Files before it keep their rewrites; the failing file is untouched.
    pub fn run(&self) -> Result<CoverageReport, CoverageError> {
        info!("Rewriting for coverage under {:?}", self.root);

        let files = discover_files(&self.root, &self.pattern, self.respect_gitignore)?;
        let mut report = CoverageReport::default();

        for path in &files {
            let source = SourceFile::read(path)?;
            let outcome = self
                .rewrite_lines(source.lines())
                .map_err(|e| CoverageError::Statement {
                    path: path.clone(),
                    source: e,
                })?;

            report.files += 1;
            report.asserts_hidden += outcome.asserts;
            report.preconditions_fixed += outcome.preconditions;

            if outcome.lines.as_slice() != source.lines() {
                source.with_lines(outcome.lines).write()?;
                debug!(
                    "Rewrote {} ({} asserts, {} preconditions)",
                    path.display(),
                    outcome.asserts,
                    outcome.preconditions
                );
                report.files_changed.push(path.clone());
            }
        }

        info!(
            "Coverage rewrite complete: {} of {} files changed",
            report.files_changed.len(),
            report.files
        );
        Ok(report)
    }

    fn rewrite_lines(&self, lines: &[String]) -> Result<FileOutcome, StatementError> {
        let hidden = neutralize_assertions(lines)?;
        let (lines, preconditions) = match &self.rewriter {
            Some(rewriter) => {
                let fixed = rewriter.rewrite(&hidden.lines)?;
                (fixed.lines, fixed.changed)
            }
            None => (hidden.lines, 0),
        };

        Ok(FileOutcome {
            lines,
            asserts: hidden.changed,
            preconditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precondition::{GuardRewriter, InlineRewriter};
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn summary_lines() {
        let report = CoverageReport {
            asserts_hidden: 3,
            preconditions_fixed: 1,
            ..CoverageReport::default()
        };
        assert_eq!(report.asserts_line(), "3 asserts hidden.");
        assert_eq!(report.preconditions_line(), "1 require()s fixed.");
    }

    #[test]
    fn asserts_only_leaves_preconditions() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "A.sol",
            "    assert(x);\n    Require.that(y, FILE, \"m\");\n",
        );

        let report = CoverageRunner::new(dir.path()).run().unwrap();
        assert_eq!(report.asserts_hidden, 1);
        assert_eq!(report.preconditions_fixed, 0);
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "  /*assert(x);*/\n    Require.that(y, FILE, \"m\");\n"
        );
    }

    #[test]
    fn hidden_precondition_is_not_rewritten_again() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "A.sol",
            "    bytes32 constant FILE = \"A\";\n    Require.that(ok, FILE, \"m\", v); // coverage-disable-line\n    Require.that(live, FILE, \"n\", w);\n",
        );
        let runner = CoverageRunner::new(dir.path()).rewriter(Some(Box::new(InlineRewriter)));

        let report = runner.run().unwrap();
        assert_eq!(report.asserts_hidden, 1);
        assert_eq!(report.preconditions_fixed, 1);
        let rewritten = fs::read_to_string(&path).unwrap();
        assert_eq!(
            rewritten,
            "    bytes32 constant FILE = \"A\";\n  /*Require.that(ok, FILE, \"m\", v);*/ // coverage-disable-line\n    require(live, /*FILE,*/ \"A: n\"/*, w*/);\n"
        );

        let again = runner.run().unwrap();
        assert!(again.files_changed.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), rewritten);
    }

    #[test]
    fn unchanged_files_are_not_written() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Clean.sol", "contract Clean {}\n");

        let report = CoverageRunner::new(dir.path())
            .rewriter(Some(Box::new(GuardRewriter)))
            .run()
            .unwrap();
        assert_eq!(report.files, 1);
        assert!(report.files_changed.is_empty());
    }

    #[test]
    fn unterminated_statement_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let content = "    assert(a);\n    assert(\n        b\n";
        let path = write(dir.path(), "Broken.sol", content);

        let err = CoverageRunner::new(dir.path()).run().unwrap_err();
        assert!(matches!(err, CoverageError::Statement { .. }));
        assert!(err.to_string().contains("line 2"));
        assert_eq!(fs::read_to_string(path).unwrap(), content);
    }

    #[test]
    fn other_extensions_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "notes.txt", "assert(x);\n");

        let report = CoverageRunner::new(dir.path()).run().unwrap();
        assert_eq!(report.files, 0);
        assert_eq!(fs::read_to_string(path).unwrap(), "assert(x);\n");
    }
}
