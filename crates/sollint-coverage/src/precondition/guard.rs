use super::PreconditionRewriter;
use crate::locator::{
    advance_precondition, CommentTracker, ScanState, StatementError, PRECONDITION_CALL,
};
use crate::neutralize::Rewrite;
use tracing::debug;

/// Body of an inserted guard statement.
pub const GUARD_BODY: &str = "{ /* FOR COVERAGE TESTING */ }";

/// Inserts `if (<condition>) { /* FOR COVERAGE TESTING */ }` above each
/// precondition call, so the condition is evaluated once as a bare branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GuardRewriter;

fn is_guard(line: &str) -> bool {
    line.trim_end().ends_with(GUARD_BODY)
}

fn guard_line(indent: &str, pieces: &[&str]) -> String {
    let condition = pieces.join(" ");
    let condition = condition.trim_end().trim_end_matches(',').trim_end();
    format!("{indent}if ({condition}) {GUARD_BODY}")
}

impl PreconditionRewriter for GuardRewriter {
    fn name(&self) -> &'static str {
        "guard"
    }

    fn rewrite(&self, lines: &[String]) -> Result<Rewrite, StatementError> {
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut state = ScanState::Idle;
        let mut comments = CommentTracker::default();
        let mut pieces: Vec<&str> = Vec::new();
        let mut guard_at = 0;
        let mut indent = "";
        let mut already_guarded = false;
        let mut changed = 0;

        for line in lines {
            let args = if state.is_idle() {
                match line.find(PRECONDITION_CALL) {
                    Some(pos) if comments.hides(line, pos) => {
                        debug!("Skipping commented-out precondition: {}", line.trim());
                        None
                    }
                    Some(pos) => {
                        state = ScanState::InPreconditionCondition { start: out.len() };
                        guard_at = out.len();
                        indent = &line[..line.len() - line.trim_start().len()];
                        already_guarded = out.last().is_some_and(|l| is_guard(l));
                        pieces.clear();
                        Some(&line[pos + PRECONDITION_CALL.len()..])
                    }
                    None => None,
                }
            } else {
                Some(line.as_str())
            };
            comments.advance(line);

            if let Some(args) = args {
                let step = advance_precondition(&mut state, args);
                let piece = step.condition.trim();
                if !piece.is_empty() {
                    pieces.push(piece);
                }

                if step.closed {
                    if already_guarded {
                        debug!("Precondition at output line {} already guarded", guard_at + 1);
                    } else {
                        out.insert(guard_at, guard_line(indent, &pieces));
                        changed += 1;
                    }
                    state = ScanState::Idle;
                }
            }

            out.push(line.clone());
        }

        state.finish()?;
        Ok(Rewrite {
            lines: out,
            changed,
        })
    }
}
