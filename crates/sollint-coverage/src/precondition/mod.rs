//! Precondition rewriters.
//!
//! Two rewrites exist for `Require.that(...)` calls and exactly one runs per
//! invocation, picked by [`PreconditionStyle`]:
//!
//! - [`GuardRewriter`] (default) copies the condition into an `if` guard
//!   above the call and leaves the call alone.
//! - [`InlineRewriter`] renames the call to `require(` and comments out the
//!   location argument and everything after the message.

mod guard;
mod inline;

pub use guard::{GuardRewriter, GUARD_BODY};
pub use inline::{InlineRewriter, RENAMED_CALL};

use crate::locator::StatementError;
use crate::neutralize::Rewrite;
use sollint_core::PreconditionStyle;

/// A whole-file rewrite of precondition calls.
pub trait PreconditionRewriter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrites every precondition call in `lines`.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::Unterminated`] if a call never closes.
    fn rewrite(&self, lines: &[String]) -> Result<Rewrite, StatementError>;
}

/// Returns the rewriter for a configured style.
#[must_use]
pub fn rewriter_for(style: PreconditionStyle) -> Box<dyn PreconditionRewriter> {
    match style {
        PreconditionStyle::Guard => Box::new(GuardRewriter),
        PreconditionStyle::Inline => Box::new(InlineRewriter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_selects_rewriter() {
        assert_eq!(rewriter_for(PreconditionStyle::Guard).name(), "guard");
        assert_eq!(rewriter_for(PreconditionStyle::Inline).name(), "inline");
    }
}
