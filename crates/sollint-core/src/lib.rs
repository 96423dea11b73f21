//! # sollint-core
//!
//! Core framework for line-oriented Solidity source linting.
//!
//! This crate provides the foundational traits and types shared by the
//! lint rules and the coverage rewriter. It includes:
//!
//! - [`SourceFile`], the line scanner every rule and rewriter consumes
//! - [`Rule`] trait for per-file rules, with an optional fix hook
//! - [`Analyzer`] for orchestrating lint execution over a directory
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use sollint_core::{Analyzer, Config};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./contracts")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! assert!(!result.has_errors());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod discovery;
mod rule;
mod source;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{
    AnalyzerConfig, Config, ConfigError, CoverageConfig, HeaderConfig, PreconditionStyle,
    RuleConfig, TestsConfig,
};
pub use context::FileContext;
pub use discovery::{discover_files, DiscoveryError, IgnoreList};
pub use rule::{Rule, RuleBox};
pub use source::{indent_width, SourceError, SourceFile};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
