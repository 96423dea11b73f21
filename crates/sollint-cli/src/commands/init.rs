//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "sollint.toml";

const DEFAULT_CONFIG: &str = r#"# sollint configuration

[analyzer]
# Project root, relative to where sollint runs (default: current directory)
# root = "."

# Where contract sources and test files live, relative to root
contracts_dir = "contracts"
tests_dir = "test"

# File name patterns
contract_pattern = "*.sol"
test_pattern = "*.js"

# One path substring per line; matching contracts are not linted.
# The file must exist when running `sollint contracts`.
ignore_file = ".soliumignore"

# Respect .gitignore files while walking
respect_gitignore = false

[header]
author = "dYdX"
solidity_version = "0.5.7"

[tests]
forbidden_marker = ".only("

[coverage]
# "guard": insert `if (<condition>) { /* FOR COVERAGE TESTING */ }` above
#          each Require.that call
# "inline": rename Require.that to require and comment out its payload
precondition_style = "guard"

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.import-order]
enabled = true

[rules.file-header]
enabled = true

[rules.function-comments]
enabled = true
# severity = "warning"  # Override default severity

[rules.no-exclusive-tests]
enabled = true
"#;

/// Writes the default config into `dir`, returning the path written.
fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_default(Path::new("."), force)?;

    println!("Created {CONFIG_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to match your project layout");
    println!("  2. Run: sollint contracts");
    println!("  3. Run: sollint tests");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sollint_core::{Config, PreconditionStyle};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses_to_defaults() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let defaults = Config::default();

        assert_eq!(config.analyzer.contracts_dir, defaults.analyzer.contracts_dir);
        assert_eq!(config.analyzer.ignore_file, defaults.analyzer.ignore_file);
        assert_eq!(config.header.solidity_version, defaults.header.solidity_version);
        assert_eq!(config.tests.forbidden_marker, defaults.tests.forbidden_marker);
        assert_eq!(config.coverage.precondition_style, PreconditionStyle::Guard);
        assert!(config.is_rule_enabled("import-order"));
        assert!(config.is_rule_enabled("no-exclusive-tests"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE_NAME), "# mine\n").unwrap();

        let err = write_default(tmp.path(), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(CONFIG_FILE_NAME)).unwrap(),
            "# mine\n"
        );

        let written = write_default(tmp.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(written).unwrap(), DEFAULT_CONFIG);
    }
}
