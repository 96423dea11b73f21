//! sollint CLI tool.
//!
//! Usage:
//! ```bash
//! sollint contracts [fix] [--path DIR]
//! sollint tests [--path DIR]
//! sollint coverage [--path DIR] [--asserts-only]
//! sollint list-rules
//! sollint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style linter and coverage rewriter for Solidity projects
#[derive(Parser)]
#[command(name = "sollint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SOLLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint contract sources (imports, headers, function comments)
    Contracts {
        /// Pass `fix` to rewrite import blocks in place
        mode: Option<Mode>,

        /// Project root (default: current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Lint test files for exclusive-test markers
    Tests {
        /// Project root (default: current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Rewrite contract sources in place for a coverage run
    Coverage {
        /// Project root (default: current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Only hide assertions; leave precondition calls alone
        #[arg(long)]
        asserts_only: bool,

        /// Precondition rewrite style (overrides config)
        #[arg(long)]
        style: Option<StyleArg>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Run mode for the contracts linter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Rewrite fixable violations in place.
    Fix,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Annotated source snippets.
    Rich,
}

/// Precondition rewrite style.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StyleArg {
    /// Insert an `if` guard above each call.
    Guard,
    /// Rename the call and comment out its payload.
    Inline,
}

impl From<StyleArg> for sollint_core::PreconditionStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Guard => Self::Guard,
            StyleArg::Inline => Self::Inline,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Contracts { path, mode, format } => {
            commands::contracts::run(&path, mode == Some(Mode::Fix), format, config_path)
        }
        Commands::Tests { path, format } => commands::tests::run(&path, format, config_path),
        Commands::Coverage {
            path,
            asserts_only,
            style,
        } => commands::coverage::run(&path, asserts_only, style.map(Into::into), config_path),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
