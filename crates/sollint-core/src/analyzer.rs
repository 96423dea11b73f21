//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::FileContext;
use crate::discovery::{discover_files, DiscoveryError, IgnoreList};
use crate::rule::{Rule, RuleBox};
use crate::source::{SourceError, SourceFile};
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error resolving the root directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading or writing a source file.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Error discovering files.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    pattern: Option<String>,
    rules: Vec<RuleBox>,
    ignore_list: IgnoreList,
    config: Option<Config>,
    fix: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the file name pattern (default: `*.sol`).
    #[must_use]
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the ignore list used to skip files.
    #[must_use]
    pub fn ignore_list(mut self, list: IgnoreList) -> Self {
        self.ignore_list = list;
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Enables fix mode: rules that can fix a file rewrite it in place.
    #[must_use]
    pub fn fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| {
            config
                .analyzer
                .root
                .join(&config.analyzer.contracts_dir)
        });

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let pattern = self
            .pattern
            .unwrap_or_else(|| config.analyzer.contract_pattern.clone());

        Ok(Analyzer {
            root,
            pattern,
            rules: self.rules,
            ignore_list: self.ignore_list,
            config,
            fix: self.fix,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    pattern: String,
    rules: Vec<RuleBox>,
    ignore_list: IgnoreList,
    config: Config,
    fix: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// Violations never abort the run; IO and discovery failures do.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery, reading, or writing fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let source = SourceFile::read(file_path)?;
            let source = if self.fix {
                self.apply_fixes(source, &mut result)?
            } else {
                source
            };

            result.violations.extend(self.analyze_file(&source));
            result.files_checked += 1;
        }

        // Sort violations by file, then line
        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Runs every enabled rule against a single file.
    fn analyze_file(&self, source: &SourceFile) -> Vec<Violation> {
        debug!("Analyzing: {}", source.path().display());

        let ctx = FileContext::new(source, &self.root);
        let mut violations = Vec::new();

        for rule in self.enabled_rules() {
            let rule_violations = rule.check(&ctx);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        violations
    }

    /// Lets each rule fix the file in turn and writes the result once.
    fn apply_fixes(
        &self,
        mut source: SourceFile,
        result: &mut LintResult,
    ) -> Result<SourceFile, AnalyzerError> {
        let mut changed = false;

        for rule in self.enabled_rules() {
            let fixed = rule.fix(&FileContext::new(&source, &self.root));
            if let Some(lines) = fixed {
                debug!("{} fixed {}", rule.name(), source.path().display());
                source = source.with_lines(lines);
                changed = true;
            }
        }

        if changed {
            source.write()?;
            let relative = FileContext::new(&source, &self.root).relative_path;
            info!("Modified {}", relative.display());
            result.files_fixed.push(relative);
        }

        Ok(source)
    }

    fn enabled_rules(&self) -> impl Iterator<Item = &RuleBox> {
        self.rules.iter().filter(|rule| {
            let enabled = self.config.is_rule_enabled(rule.name());
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.name());
            }
            enabled
        })
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers source files to analyze, minus ignored ones.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let files = discover_files(
            &self.root,
            &self.pattern,
            self.config.analyzer.respect_gitignore,
        )?;

        Ok(files
            .into_iter()
            .filter(|path| {
                let ignored = self.ignore_list.is_ignored(path);
                if ignored {
                    debug!("Excluding: {}", path.display());
                }
                !ignored
            })
            .collect())
    }
}
