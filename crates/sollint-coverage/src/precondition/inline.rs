use super::PreconditionRewriter;
use crate::locator::{
    CommentTracker, ScanState, StatementError, CALL_CLOSE, COMMENT_CLOSE, COMMENT_OPEN, LOCATION_ARG,
    PRECONDITION_CALL,
};
use crate::neutralize::Rewrite;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Call token that replaces [`PRECONDITION_CALL`].
pub const RENAMED_CALL: &str = "require(";

const MESSAGE_END: &str = "\",";

/// Renames each precondition call to a plain `require(`, comments out the
/// location argument, prefixes the message with the file identifier and
/// comments out whatever follows the message.
///
/// ```text
/// Require.that(a > b, FILE, "Too big", a);
/// require(a > b, /*FILE,*/ "Admin: Too big"/*, a*/);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineRewriter;

fn file_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r#"^\s*bytes32\s+(?:(?:private|internal|public)\s+)?constant\s+FILE\s*=\s*"([^"]*)""#,
            )
            .ok()
        })
        .as_ref()
}

/// Extracts the identifier from a `bytes32 constant FILE = "<id>";` line.
fn declared_file_id(line: &str) -> Option<String> {
    file_id_pattern()?
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Per-call progress while the call is open.
#[derive(Debug, Default)]
struct CallState {
    message_started: bool,
    opened: bool,
}

impl InlineRewriter {
    /// Rewrites the part of `line` from `cursor` on. Returns true once the
    /// call closes.
    fn rewrite_args(
        state: &mut ScanState,
        call: &mut CallState,
        line: &mut String,
        mut cursor: usize,
        file_id: Option<&str>,
    ) -> bool {
        if let ScanState::InPreconditionCondition { start } = *state {
            let close = line[cursor..].find(CALL_CLOSE).map(|p| p + cursor);
            let location = line[cursor..].find(LOCATION_ARG).map(|p| p + cursor);
            if let Some(pos) = location.filter(|l| close.map_or(true, |c| *l < c)) {
                let wrapped = format!("{COMMENT_OPEN}{LOCATION_ARG}{COMMENT_CLOSE}");
                line.replace_range(pos..pos + LOCATION_ARG.len(), &wrapped);
                cursor = pos + wrapped.len();
                *state = ScanState::InPreconditionMessage { start };
            }
        }

        if let ScanState::InPreconditionMessage { .. } = *state {
            if !call.message_started {
                if let Some(quote) = line[cursor..].find('"').map(|p| p + cursor) {
                    call.message_started = true;
                    cursor = quote + 1;
                    if let Some(id) = file_id {
                        let prefix = format!("{id}: ");
                        line.insert_str(cursor, &prefix);
                        cursor += prefix.len();
                    }
                }
            }
            if call.message_started && !call.opened {
                if let Some(end) = line[cursor..].find(MESSAGE_END).map(|p| p + cursor) {
                    line.insert_str(end + 1, COMMENT_OPEN);
                    cursor = end + 1 + COMMENT_OPEN.len();
                    call.opened = true;
                }
            }
        }

        match line[cursor..].find(CALL_CLOSE).map(|p| p + cursor) {
            Some(close) => {
                if call.opened {
                    line.insert_str(close, COMMENT_CLOSE);
                }
                true
            }
            None => false,
        }
    }
}

impl PreconditionRewriter for InlineRewriter {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn rewrite(&self, lines: &[String]) -> Result<Rewrite, StatementError> {
        let mut out = Vec::with_capacity(lines.len());
        let mut state = ScanState::Idle;
        let mut comments = CommentTracker::default();
        let mut call = CallState::default();
        let mut file_id: Option<String> = None;
        let mut changed = 0;

        for (i, line) in lines.iter().enumerate() {
            if let Some(id) = declared_file_id(line) {
                debug!("File identifier `{id}` declared at line {}", i + 1);
                file_id = Some(id);
            }

            let mut rewritten = line.clone();
            let cursor = if state.is_idle() {
                match rewritten.find(PRECONDITION_CALL) {
                    Some(pos) if comments.hides(line, pos) => {
                        debug!("Skipping commented-out precondition at line {}", i + 1);
                        None
                    }
                    Some(pos) => {
                        rewritten.replace_range(pos..pos + PRECONDITION_CALL.len(), RENAMED_CALL);
                        state = ScanState::InPreconditionCondition { start: i };
                        call = CallState::default();
                        changed += 1;
                        Some(pos + RENAMED_CALL.len())
                    }
                    None => None,
                }
            } else {
                Some(0)
            };
            comments.advance(line);

            if let Some(cursor) = cursor {
                let closed = Self::rewrite_args(
                    &mut state,
                    &mut call,
                    &mut rewritten,
                    cursor,
                    file_id.as_deref(),
                );
                if closed {
                    state = ScanState::Idle;
                }
            }

            out.push(rewritten);
        }

        state.finish()?;
        Ok(Rewrite {
            lines: out,
            changed,
        })
    }
}
