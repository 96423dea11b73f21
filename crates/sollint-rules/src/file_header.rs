//! Rule to require the standard contract file header.
//!
//! Every contract file must contain these lines verbatim, anywhere in the file:
//!
//! ```text
//!  * @title <FileName>
//!  * @author <author>
//!  *
//! pragma solidity <version>;
//! pragma experimental ABIEncoderV2;
//! ```
//!
//! Each missing line is reported on its own, so a single pass shows every
//! problem.

use sollint_core::{FileContext, HeaderConfig, Rule, Severity, Suggestion, Violation};

/// Rule code for file-header.
pub const CODE: &str = "SL002";

/// Rule name for file-header.
pub const NAME: &str = "file-header";

const BLANK_LINE: &str = " *";
const ABI_ENCODER_LINE: &str = "pragma experimental ABIEncoderV2;";

/// Requires the title, author, comment, and pragma boilerplate.
#[derive(Debug, Clone)]
pub struct FileHeader {
    /// Expected author.
    pub author: String,
    /// Expected compiler version.
    pub solidity_version: String,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHeader {
    /// Creates a new rule with the default header settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&HeaderConfig::default())
    }

    /// Creates a rule from the `[header]` config section.
    #[must_use]
    pub fn from_config(config: &HeaderConfig) -> Self {
        Self {
            author: config.author.clone(),
            solidity_version: config.solidity_version.clone(),
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Required lines paired with the message reported when one is absent.
    fn requirements(&self, ctx: &FileContext) -> [(String, String); 5] {
        let file_name = ctx.file_name();
        let stem = ctx.source.file_stem();
        [
            (
                format!(" * @title {stem}"),
                format!("No title (or incorrect title) line in {file_name}"),
            ),
            (
                format!(" * @author {}", self.author),
                format!("No author (or incorrect author) line in {file_name}"),
            ),
            (
                BLANK_LINE.to_string(),
                format!("Unlikely to be a proper file-level comment in {file_name}"),
            ),
            (
                format!("pragma solidity {};", self.solidity_version),
                format!(
                    "Unlikely to be using solidity version {} in {file_name}",
                    self.solidity_version
                ),
            ),
            (
                ABI_ENCODER_LINE.to_string(),
                format!("Must use ABIEncoderV2 in {file_name}"),
            ),
        ]
    }
}

impl Rule for FileHeader {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires title, author, and pragma lines in every contract file"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        self.requirements(ctx)
            .into_iter()
            .filter(|(line, _)| !ctx.source.contains_line(line))
            .map(|(line, message)| {
                Violation::new(CODE, NAME, self.severity, ctx.location(1, 1), message)
                    .with_suggestion(Suggestion::new(format!("Add the line `{line}`")))
            })
            .collect()
    }
}
