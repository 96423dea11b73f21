//! Coverage command implementation.

use anyhow::{Context, Result};
use sollint_core::PreconditionStyle;
use sollint_coverage::CoverageRunner;
use std::path::Path;

use crate::config_resolver;

/// Runs the coverage command. Always exits successfully once the rewrite
/// finishes; only structural failures are errors.
pub fn run(
    path: &Path,
    asserts_only: bool,
    style: Option<PreconditionStyle>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = config_resolver::load(path, config_path)?;
    if let Some(style) = style {
        config.coverage.precondition_style = style;
    }

    let mut runner =
        CoverageRunner::from_config(&config).context("Failed to set up coverage rewrite")?;
    if asserts_only {
        runner = runner.rewriter(None);
    } else {
        tracing::debug!(
            "Rewriting preconditions with the {:?} style",
            config.coverage.precondition_style
        );
    }

    let report = runner.run().context("Coverage rewrite failed")?;

    for file in &report.files_changed {
        let shown = file.strip_prefix(runner.root()).unwrap_or(file);
        tracing::debug!("modified {}", shown.display());
    }

    println!("{}", report.asserts_line());
    if !asserts_only {
        println!("{}", report.preconditions_line());
    }

    Ok(())
}
