//! Assertion neutralizer: hides `assert(...)` statements inside block
//! comments so coverage tools stop counting their unreachable branch.

use crate::locator::{locate_assertions, StatementError, CALL_CLOSE, COMMENT_CLOSE, COMMENT_OPEN};
use sollint_core::indent_width;

/// Rewritten lines plus the number of statements changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Output lines.
    pub lines: Vec<String>,
    /// Number of statements rewritten.
    pub changed: usize,
}

/// Wraps every hideable assertion span in `/* ... */`.
///
/// The opening marker replaces two columns of indentation so the code keeps
/// its alignment; the closing marker goes right after the first `);` on
/// the span's last line. Lines outside spans are copied unchanged.
///
/// ```text
///         assert(x > 0);      =>        /*assert(x > 0);*/
/// ```
///
/// # Errors
///
/// Returns [`StatementError::Unterminated`] if an assertion never closes.
pub fn neutralize_assertions(lines: &[String]) -> Result<Rewrite, StatementError> {
    let spans = locate_assertions(lines)?;
    let mut out = lines.to_vec();

    for span in &spans {
        let first = &out[span.start];
        let indent = indent_width(first).saturating_sub(2);
        let opened = format!("{}{COMMENT_OPEN}{}", " ".repeat(indent), first.trim_start());
        out[span.start] = opened;

        let last = &mut out[span.end];
        if let Some(pos) = last.find(CALL_CLOSE) {
            last.insert_str(pos + CALL_CLOSE.len(), COMMENT_CLOSE);
        }
    }

    Ok(Rewrite {
        lines: out,
        changed: spans.len(),
    })
}
