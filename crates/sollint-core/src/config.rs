//! Configuration types for sollint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for sollint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Required file header settings.
    #[serde(default)]
    pub header: HeaderConfig,

    /// Test file settings.
    #[serde(default)]
    pub tests: TestsConfig,

    /// Coverage preparation settings.
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }
}

/// Analyzer-level configuration: where files live and which ones to take.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Project root (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory holding contract sources, relative to `root`.
    #[serde(default = "default_contracts_dir")]
    pub contracts_dir: PathBuf,

    /// Directory holding test files, relative to `root`.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,

    /// File name pattern for contract sources.
    #[serde(default = "default_contract_pattern")]
    pub contract_pattern: String,

    /// File name pattern for test files.
    #[serde(default = "default_test_pattern")]
    pub test_pattern: String,

    /// Ignore-list file, relative to `root`. One path substring per line.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: PathBuf,

    /// Whether to respect .gitignore files while walking.
    #[serde(default)]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            contracts_dir: default_contracts_dir(),
            tests_dir: default_tests_dir(),
            contract_pattern: default_contract_pattern(),
            test_pattern: default_test_pattern(),
            ignore_file: default_ignore_file(),
            respect_gitignore: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_contracts_dir() -> PathBuf {
    PathBuf::from("contracts")
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("test")
}

fn default_contract_pattern() -> String {
    "*.sol".to_string()
}

fn default_test_pattern() -> String {
    "*.js".to_string()
}

fn default_ignore_file() -> PathBuf {
    PathBuf::from(".soliumignore")
}

/// Boilerplate every contract file header must carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Value of the ` * @author` line.
    #[serde(default = "default_author")]
    pub author: String,

    /// Compiler version in the `pragma solidity` line.
    #[serde(default = "default_solidity_version")]
    pub solidity_version: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            solidity_version: default_solidity_version(),
        }
    }
}

fn default_author() -> String {
    "dYdX".to_string()
}

fn default_solidity_version() -> String {
    "0.5.7".to_string()
}

/// Test file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestsConfig {
    /// Substring that must never appear in a committed test file.
    #[serde(default = "default_forbidden_marker")]
    pub forbidden_marker: String,
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            forbidden_marker: default_forbidden_marker(),
        }
    }
}

fn default_forbidden_marker() -> String {
    ".only(".to_string()
}

/// How precondition calls are rewritten for coverage runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreconditionStyle {
    /// Duplicate the condition into an `if` guard above the call.
    #[default]
    Guard,
    /// Rename the call and comment out its location and message payload.
    Inline,
}

/// Coverage preparation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageConfig {
    /// Which precondition rewrite to apply.
    #[serde(default)]
    pub precondition_style: PreconditionStyle,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
