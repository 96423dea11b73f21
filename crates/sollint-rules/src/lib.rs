//! # sollint-rules
//!
//! Built-in lint rules for sollint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | SL001 | `import-order` | Sorted imports, no unused or duplicate entries (fixable) |
//! | SL002 | `file-header` | Title, author, and pragma boilerplate in every contract |
//! | SL003 | `function-comments` | Param spacing, alignment, and blank separator in doc blocks |
//! | SL004 | `no-exclusive-tests` | No `.only(` left in test files |
//!
//! ## Usage
//!
//! ```ignore
//! use sollint_core::{Analyzer, Config};
//! use sollint_rules::contract_rules;
//!
//! let config = Config::default();
//! let mut builder = Analyzer::builder().root("./contracts");
//! for rule in contract_rules(&config) {
//!     builder = builder.rule_box(rule);
//! }
//! let result = builder.build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod file_header;
mod function_comments;
mod import_order;
mod presets;

pub use file_header::FileHeader;
pub use function_comments::FunctionComments;
pub use import_order::{ImportBlock, ImportDecl, ImportOrder};
pub use no_exclusive_tests::NoExclusiveTests;
pub use presets::{all_rules, contract_rules, test_rules, Target};

/// Re-export core types for convenience.
pub use sollint_core::{Rule, Severity, Violation};
