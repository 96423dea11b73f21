//! Rule sets for the two lint targets.

use crate::{FileHeader, FunctionComments, ImportOrder, NoExclusiveTests};
use sollint_core::{Config, RuleBox};

/// Which files a rule set is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Contract sources under the contracts directory.
    Contracts,
    /// Test files under the tests directory.
    Tests,
}

impl Target {
    /// Returns the rules for this target.
    #[must_use]
    pub fn rules(self, config: &Config) -> Vec<RuleBox> {
        match self {
            Self::Contracts => contract_rules(config),
            Self::Tests => test_rules(config),
        }
    }
}

/// Returns the rules run against contract sources.
///
/// Includes:
/// - `function-comments` (SL003)
/// - `import-order` (SL001)
/// - `file-header` (SL002)
#[must_use]
pub fn contract_rules(config: &Config) -> Vec<RuleBox> {
    vec![
        Box::new(FunctionComments::new()),
        Box::new(ImportOrder::new()),
        Box::new(FileHeader::from_config(&config.header)),
    ]
}

/// Returns the rules run against test files.
///
/// Includes:
/// - `no-exclusive-tests` (SL004)
#[must_use]
pub fn test_rules(config: &Config) -> Vec<RuleBox> {
    vec![Box::new(NoExclusiveTests::from_config(&config.tests))]
}

/// Returns all available rules, ordered by code.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ImportOrder::new()),
        Box::new(FileHeader::new()),
        Box::new(FunctionComments::new()),
        Box::new(NoExclusiveTests::new()),
    ]
}
