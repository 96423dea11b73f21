//! Contracts command implementation.

use anyhow::{Context, Result};
use sollint_core::{Analyzer, IgnoreList};
use sollint_rules::Target;
use std::path::Path;

use super::output::{self, Summary};
use crate::{config_resolver, OutputFormat};

/// Line printed when no contract violations remain.
pub const CLEAN_MESSAGE: &str = "No contract linting issues found.";

/// Runs the contracts command.
pub fn run(path: &Path, fix: bool, format: OutputFormat, config_path: Option<&Path>) -> Result<()> {
    let config = config_resolver::load(path, config_path)?;

    let ignore_path = config.analyzer.root.join(&config.analyzer.ignore_file);
    let ignore_list = IgnoreList::from_file(&ignore_path)
        .with_context(|| format!("Failed to load ignore list: {}", ignore_path.display()))?;
    tracing::debug!("Loaded {} ignore entries", ignore_list.len());

    let rules = Target::Contracts.rules(&config);
    let mut builder = Analyzer::builder()
        .config(config)
        .ignore_list(ignore_list)
        .fix(fix);
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Linting contracts under {:?} with {} rules{}",
        analyzer.root(),
        analyzer.rule_count(),
        if fix { " (fix mode)" } else { "" }
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    output::print(
        &result,
        format,
        &Summary {
            clean_message: CLEAN_MESSAGE,
            root: analyzer.root(),
        },
    )?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}
