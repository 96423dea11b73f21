//! Subcommand implementations.

pub mod contracts;
pub mod coverage;
pub mod init;
pub mod list_rules;
pub mod output;
