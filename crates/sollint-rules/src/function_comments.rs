//! Rule to enforce the layout of `/** ... */` documentation blocks.
//!
//! # Detected Patterns
//!
//! - A `param` tag followed by one space, or by three or more spaces. The
//!   house style is exactly two (`@param  owner  The owner`). Checked on
//!   every line, inside a block or not.
//! - Parameter and `@returns` descriptions not starting in the same column
//!   as the first one in the block.
//! - A parameter list with no blank ` *` line before it. Reported once per
//!   block.

use sollint_core::{FileContext, Rule, Severity, Violation};

/// Rule code for function-comments.
pub const CODE: &str = "SL003";

/// Rule name for function-comments.
pub const NAME: &str = "function-comments";

/// Scan state for one pass over a file.
#[derive(Debug, Default)]
struct BlockState {
    in_block: bool,
    seen_blank: bool,
    already_complained: bool,
    arg_column: usize,
}

impl BlockState {
    fn open(&mut self) {
        *self = Self {
            in_block: true,
            ..Self::default()
        };
    }
}

/// Column (0-indexed) where the description of a tag line starts, if any.
fn description_column(line: &str, trimmed: &str, words: &[&str]) -> usize {
    let mut col = 0;
    if trimmed.contains("param ") && words.len() >= 4 {
        col = line
            .find(&format!(" {}", words[3]))
            .map_or(0, |i| i + 1);
    }
    if trimmed.contains("@returns") && words.len() >= 3 {
        col = line.find(words[2]).unwrap_or(0);
    }
    col
}

/// Enforces spacing, alignment, and separation in documentation blocks.
#[derive(Debug, Clone)]
pub struct FunctionComments {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for FunctionComments {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionComments {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn violation(&self, ctx: &FileContext, line_no: usize, message: impl Into<String>) -> Violation {
        let message = format!("{} ({}:{line_no})", message.into(), ctx.file_name());
        Violation::new(CODE, NAME, self.severity, ctx.location(line_no, 1), message)
    }
}

impl Rule for FunctionComments {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces param spacing and alignment in function comments"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut state = BlockState::default();

        for (i, line) in ctx.source.lines().iter().enumerate() {
            let line_no = i + 1;
            let trimmed = line.trim_start();
            let words: Vec<&str> = line.split_whitespace().collect();

            if trimmed.contains("param ") && !trimmed.contains("param  ") {
                violations.push(self.violation(ctx, line_no, "Param has only one space"));
            }
            if trimmed.contains("param   ") {
                violations.push(self.violation(ctx, line_no, "Param has more than two spaces"));
            }

            if !state.in_block && trimmed.starts_with("/**") {
                state.open();
            }

            if state.in_block {
                let col = description_column(line, trimmed, &words);
                if col > 0 {
                    if state.arg_column == 0 {
                        state.arg_column = col;
                    } else if col != state.arg_column {
                        violations.push(self.violation(
                            ctx,
                            line_no,
                            format!("Params not aligned to column {}", state.arg_column + 1),
                        ));
                    }
                }

                if trimmed.trim_end() == "*" {
                    state.seen_blank = true;
                }

                if !state.seen_blank
                    && !state.already_complained
                    && (trimmed.contains("*  param") || trimmed.contains("* @param"))
                {
                    state.already_complained = true;
                    violations.push(self.violation(
                        ctx,
                        line_no,
                        "No blank line before param list in function comment",
                    ));
                }

                if line.trim_end().ends_with("*/") {
                    state.in_block = false;
                }
            }
        }

        violations
    }
}
