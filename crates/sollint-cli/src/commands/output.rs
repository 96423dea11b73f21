//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use miette::GraphicalReportHandler;
use sollint_core::{LintResult, Severity, ViolationDiagnostic};
use std::fmt::Write as _;
use std::path::Path;

use crate::OutputFormat;

/// Run-specific pieces of the printed report.
pub struct Summary<'a> {
    /// Line printed when the run found nothing.
    pub clean_message: &'a str,
    /// Directory violation paths are relative to.
    pub root: &'a Path,
}

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, summary: &Summary<'_>) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result, summary),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Rich => render_rich(result, summary, &GraphicalReportHandler::new())?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn render_modified(out: &mut String, result: &LintResult) {
    for path in &result.files_fixed {
        let _ = writeln!(out, "modified {}", path.display());
    }
}

fn render_summary(out: &mut String, result: &LintResult, summary: &Summary<'_>) {
    if result.violations.is_empty() {
        let _ = writeln!(out, "\x1b[32m{}\x1b[0m", summary.clean_message);
        return;
    }

    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 { "\x1b[31m" } else { "\x1b[33m" };
    let _ = writeln!(
        out,
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    );
}

fn render_text(result: &LintResult, summary: &Summary<'_>) -> String {
    let mut out = String::new();
    render_modified(&mut out, result);

    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(out, "  {severity_indicator}: {}", violation.message);
        if let Some(suggestion) = &violation.suggestion {
            for (i, line) in suggestion.message.lines().enumerate() {
                let lead = if i == 0 { "  = help: " } else { "          " };
                let _ = writeln!(out, "{lead}{line}");
            }
        }
        out.push('\n');
    }

    render_summary(&mut out, result, summary);
    out
}

fn render_compact(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let _ = writeln!(out, "{violation}");
    }
    out
}

fn render_rich(
    result: &LintResult,
    summary: &Summary<'_>,
    handler: &GraphicalReportHandler,
) -> Result<String> {
    let mut out = String::new();
    render_modified(&mut out, result);

    for violation in &result.violations {
        let path = summary.root.join(&violation.location.file);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let diagnostic = ViolationDiagnostic::new(violation, text);
        handler
            .render_report(&mut out, &diagnostic)
            .context("Failed to render diagnostic")?;
        out.push('\n');
    }

    render_summary(&mut out, result, summary);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::GraphicalTheme;
    use sollint_core::{Location, Suggestion, Violation};
    use std::path::PathBuf;

    fn plain() -> GraphicalReportHandler {
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
    }

    fn summary(root: &Path) -> Summary<'_> {
        Summary {
            clean_message: "No contract linting issues found.",
            root,
        }
    }

    fn sample() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(
            Violation::new(
                "SL002",
                "file-header",
                Severity::Error,
                Location::new(PathBuf::from("Vault.sol"), 1, 1),
                "No title (or incorrect title) line in Vault.sol",
            )
            .with_suggestion(Suggestion::new("Add the line ` * @title Vault`")),
        );
        result
    }

    #[test]
    fn clean_run_prints_clean_message() {
        let mut result = LintResult::new();
        result.files_fixed.push(PathBuf::from("lib/Math.sol"));
        let text = render_text(&result, &summary(Path::new(".")));
        assert_eq!(
            text,
            "modified lib/Math.sol\n\x1b[32mNo contract linting issues found.\x1b[0m\n"
        );
    }

    #[test]
    fn text_lists_violation_and_help() {
        let text = render_text(&sample(), &summary(Path::new(".")));
        assert!(text.starts_with("SL002 file-header at Vault.sol:1:1\n"));
        assert!(text.contains("  = help: Add the line ` * @title Vault`\n"));
        assert!(text.contains("Found 1 error(s), 0 warning(s), 0 info(s) in 2 file(s)"));
        assert!(!text.contains("No contract linting issues found."));
    }

    #[test]
    fn multi_line_help_is_indented() {
        let mut result = sample();
        result.violations[0].suggestion = Some(Suggestion::new("first\nsecond"));
        let text = render_text(&result, &summary(Path::new(".")));
        assert!(text.contains("  = help: first\n          second\n"));
    }

    #[test]
    fn compact_is_one_line_per_violation() {
        assert_eq!(
            render_compact(&sample()),
            "Vault.sol:1:1: error [SL002] No title (or incorrect title) line in Vault.sol\n"
        );
    }

    #[test]
    fn rich_renders_source_snippet() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("Vault.sol"), "pragma solidity 0.5.7;\n").unwrap();

        let text = render_rich(&sample(), &summary(dir.path()), &plain()).unwrap();
        assert!(text.contains("No title (or incorrect title) line in Vault.sol"));
        assert!(text.contains("pragma solidity 0.5.7;"));
    }

    #[test]
    fn rich_fails_when_source_is_gone() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(render_rich(&sample(), &summary(dir.path()), &plain()).is_err());
    }
}
