//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::types::{Severity, Violation};

/// A per-file lint rule operating on scanned source lines.
///
/// Rules never parse the language grammar. They match line prefixes,
/// substrings and small state machines over [`FileContext::source`].
///
/// # Example
///
/// ```ignore
/// use sollint_core::{FileContext, Rule, Violation};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "SL100" }
///
///     fn check(&self, ctx: &FileContext) -> Vec<Violation> {
///         ctx.source
///             .lines()
///             .iter()
///             .enumerate()
///             .filter(|(_, l)| l.contains('\t'))
///             .map(|(i, _)| Violation::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 ctx.location(i + 1, 1),
///                 "Tab character",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "import-order").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "SL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext) -> Vec<Violation>;

    /// Computes a corrected version of the file, if this rule can fix it.
    ///
    /// Returns `None` when the rule has no automatic fix or the file is
    /// already correct. Only called when the analyzer runs in fix mode.
    fn fix(&self, _ctx: &FileContext) -> Option<Vec<String>> {
        None
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceFile;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location(1, 1),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
    }

    #[test]
    fn default_fix_is_none() {
        let source = SourceFile::from_text("A.sol", "contract A {}\n");
        let ctx = FileContext::new(&source, Path::new("."));
        assert!(TestRule.fix(&ctx).is_none());
        assert_eq!(TestRule.check(&ctx).len(), 1);
    }
}
