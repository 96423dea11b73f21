//! Statement locator: finds the line extent of assertion and precondition
//! calls without parsing the language.
//!
//! A statement opens on a line matching its call prefix and closes on the
//! first line (the same one included) carrying [`CALL_CLOSE`]. Only one
//! statement is open at a time.

use std::fmt;

/// Assertion call prefix, matched after leading whitespace.
pub const ASSERT_CALL: &str = "assert(";

/// Line marker that keeps an assertion live.
pub const ENABLE_MARKER: &str = "coverage-enable-line";

/// Line marker that hides any statement, assertion or not.
pub const DISABLE_MARKER: &str = "coverage-disable-line";

/// Precondition call prefix, matched anywhere on a line.
pub const PRECONDITION_CALL: &str = "Require.that(";

/// Argument that separates a precondition's condition from its message.
pub const LOCATION_ARG: &str = "FILE,";

/// End of a call statement.
pub const CALL_CLOSE: &str = ");";

/// Opening of a block comment.
pub const COMMENT_OPEN: &str = "/*";

/// Closing of a block comment.
pub const COMMENT_CLOSE: &str = "*/";

/// Start of a line comment.
pub const LINE_COMMENT: &str = "//";

/// The kind of statement being tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// `assert(...)` or a line carrying the disable marker.
    Assertion,
    /// `Require.that(...)`.
    Precondition,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assertion => write!(f, "assertion"),
            Self::Precondition => write!(f, "precondition"),
        }
    }
}

/// Errors raised while scanning statements.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatementError {
    /// The input ended while a statement was still open.
    #[error("Unterminated {kind} starting at line {line}: no `);` before end of file")]
    Unterminated {
        /// Kind of the open statement.
        kind: StatementKind,
        /// 1-indexed line the statement started on.
        line: usize,
    },
}

/// Scan state, advanced one line at a time. Indices are 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanState {
    /// Between statements.
    #[default]
    Idle,
    /// Inside an assertion.
    InAssertion {
        /// Line the assertion started on.
        start: usize,
    },
    /// Inside a precondition, still reading its condition.
    InPreconditionCondition {
        /// Line the call started on.
        start: usize,
    },
    /// Inside a precondition, past the location argument.
    InPreconditionMessage {
        /// Line the call started on.
        start: usize,
    },
}

impl ScanState {
    /// Whether no statement is open.
    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// Line the open statement started on.
    #[must_use]
    pub fn start(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::InAssertion { start }
            | Self::InPreconditionCondition { start }
            | Self::InPreconditionMessage { start } => Some(start),
        }
    }

    /// Kind of the open statement.
    #[must_use]
    pub fn kind(self) -> Option<StatementKind> {
        match self {
            Self::Idle => None,
            Self::InAssertion { .. } => Some(StatementKind::Assertion),
            Self::InPreconditionCondition { .. } | Self::InPreconditionMessage { .. } => {
                Some(StatementKind::Precondition)
            }
        }
    }

    /// Checks the state at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Unterminated`] if a statement is still open.
    pub fn finish(self) -> Result<(), StatementError> {
        match (self.kind(), self.start()) {
            (Some(kind), Some(start)) => Err(StatementError::Unterminated {
                kind,
                line: start + 1,
            }),
            _ => Ok(()),
        }
    }
}

/// Block comment state carried from line to line.
///
/// Block comments do not nest, so a statement found inside one must be left
/// alone: wrapping it again would close the outer comment early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentTracker {
    open: bool,
}

/// Scans `text` starting with a block comment open or not. Returns whether
/// one is open at the end and whether a line comment was reached.
fn scan_comments(mut open: bool, text: &str) -> (bool, bool) {
    let mut rest = text;
    loop {
        if open {
            match rest.find(COMMENT_CLOSE) {
                Some(pos) => {
                    rest = &rest[pos + COMMENT_CLOSE.len()..];
                    open = false;
                }
                None => return (true, false),
            }
        } else {
            let line_comment = rest.find(LINE_COMMENT);
            match rest.find(COMMENT_OPEN) {
                Some(pos) if line_comment.map_or(true, |l| pos < l) => {
                    rest = &rest[pos + COMMENT_OPEN.len()..];
                    open = true;
                }
                _ => return (false, line_comment.is_some()),
            }
        }
    }
}

impl CommentTracker {
    /// Whether a block comment is open at the start of the next line.
    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Whether byte `pos` of `line` sits inside a comment of either kind.
    #[must_use]
    pub fn hides(self, line: &str, pos: usize) -> bool {
        let (open, line_comment) = scan_comments(self.open, &line[..pos]);
        open || line_comment
    }

    /// Moves past `line`.
    pub fn advance(&mut self, line: &str) {
        self.open = scan_comments(self.open, line).0;
    }
}

/// A contiguous run of lines holding one statement. Indices are 0-based
/// and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Statement kind.
    pub kind: StatementKind,
    /// First line.
    pub start: usize,
    /// Line carrying the closing `);`.
    pub end: usize,
}

/// Whether `line` starts an assertion that should be hidden.
///
/// True for `assert(` lines without the enable marker and for any line
/// with the disable marker. Lines already wrapped in a block comment never
/// match, so hiding is idempotent.
#[must_use]
pub fn opens_assertion(line: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with(COMMENT_OPEN) {
        return false;
    }
    let is_assert = trimmed.starts_with(ASSERT_CALL) && !line.contains(ENABLE_MARKER);
    is_assert || line.contains(DISABLE_MARKER)
}

/// Finds every assertion span in `lines`. Lines that start inside a block
/// comment never open a span.
///
/// # Errors
///
/// Returns [`StatementError::Unterminated`] if the input ends inside an
/// assertion.
pub fn locate_assertions(lines: &[String]) -> Result<Vec<Span>, StatementError> {
    let mut state = ScanState::Idle;
    let mut comments = CommentTracker::default();
    let mut spans = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let commented = comments.is_open();
        comments.advance(line);

        if state.is_idle() && !commented && opens_assertion(line) {
            state = ScanState::InAssertion { start: i };
        }

        if let ScanState::InAssertion { start } = state {
            if line.contains(CALL_CLOSE) {
                spans.push(Span {
                    kind: StatementKind::Assertion,
                    start,
                    end: i,
                });
                state = ScanState::Idle;
            }
        }
    }

    state.finish()?;
    Ok(spans)
}

/// What one line of call arguments contributed to a precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advance<'a> {
    /// Part of the line that belongs to the boolean condition.
    pub condition: &'a str,
    /// Whether the call closed on this line.
    pub closed: bool,
}

/// Transition for a precondition call given the argument text of one line.
///
/// In the condition phase, text up to the location argument (or up to the
/// close, whichever comes first) is condition text; reaching the location
/// argument moves to the message phase. In the message phase only the
/// close matters. Leaves `state` unchanged when idle or in an assertion.
pub fn advance_precondition<'a>(state: &mut ScanState, args: &'a str) -> Advance<'a> {
    match *state {
        ScanState::InPreconditionCondition { start } => {
            let location = args.find(LOCATION_ARG);
            let close = args.find(CALL_CLOSE);
            match (location, close) {
                (Some(l), c) if c.map_or(true, |c| l < c) => {
                    *state = ScanState::InPreconditionMessage { start };
                    Advance {
                        condition: &args[..l],
                        closed: args[l..].contains(CALL_CLOSE),
                    }
                }
                (_, Some(c)) => Advance {
                    condition: &args[..c],
                    closed: true,
                },
                _ => Advance {
                    condition: args,
                    closed: false,
                },
            }
        }
        ScanState::InPreconditionMessage { .. } => Advance {
            condition: "",
            closed: args.contains(CALL_CLOSE),
        },
        ScanState::Idle | ScanState::InAssertion { .. } => Advance::default(),
    }
}
