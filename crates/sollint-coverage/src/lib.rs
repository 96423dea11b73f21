//! # sollint-coverage
//!
//! Prepares Solidity sources for a coverage run by rewriting statements
//! whose extra branches would otherwise count against coverage.
//!
//! - [`neutralize_assertions`] wraps `assert(...)` statements (and lines
//!   carrying `coverage-disable-line`) in block comments.
//! - [`PreconditionRewriter`] implementations handle `Require.that(...)`:
//!   [`GuardRewriter`] (default) or [`InlineRewriter`].
//! - [`CoverageRunner`] applies both to every file under a directory.
//!
//! All rewrites work line by line with a small state machine
//! ([`ScanState`]) rather than a parser, and are idempotent: running them
//! over their own output changes nothing.
//!
//! ## Example
//!
//! ```ignore
//! use sollint_core::Config;
//! use sollint_coverage::CoverageRunner;
//!
//! let report = CoverageRunner::from_config(&Config::default())?.run()?;
//! println!("{}", report.asserts_line());
//! println!("{}", report.preconditions_line());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod locator;
pub mod neutralize;
pub mod precondition;
mod runner;

pub use locator::{ScanState, Span, StatementError, StatementKind};
pub use neutralize::{neutralize_assertions, Rewrite};
pub use precondition::{rewriter_for, GuardRewriter, InlineRewriter, PreconditionRewriter};
pub use runner::{CoverageError, CoverageReport, CoverageRunner};
