//! Finding and loading `sollint.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <path>`
//! 2. `<project>/sollint.toml`, then `<project>/.sollint.toml`
//! 3. `$SOLLINT_CONFIG_DIR/config.toml`, else `~/.sollint/config.toml`
//! 4. built-in defaults

use anyhow::{Context, Result};
use sollint_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the per-user config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the config file path, if there is one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Loads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No config file found, using defaults");
            return Ok(Config::default());
        };

        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }

        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["sollint.toml", ".sollint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Finds the configuration for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_in(project_dir, explicit, global_config_dir())
}

/// Resolves and loads the configuration for `project_dir`, then anchors a
/// relative `analyzer.root` at `project_dir`.
///
/// # Errors
///
/// Returns an error if a config file was found but could not be loaded.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut config = resolve(project_dir, explicit).load()?;
    if config.analyzer.root.is_relative() {
        config.analyzer.root = project_dir.join(&config.analyzer.root);
    }
    Ok(config)
}

// Takes the global directory as a parameter so tests never touch the
// process environment.
fn resolve_in(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<PathBuf>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.exists());
    if let Some(candidate) = project {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.exists() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// Returns the per-user config directory: `$SOLLINT_CONFIG_DIR` if set,
/// else `~/.sollint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("SOLLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".sollint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sollint_core::PreconditionStyle;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_even_if_missing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sollint.toml"), "").unwrap();

        let explicit = Path::new("/nonexistent/custom.toml");
        let result = resolve_in(tmp.path(), Some(explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit.to_path_buf()));
    }

    #[test]
    fn plain_name_preferred_over_dotfile() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".sollint.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".sollint.toml"))
        );

        fs::write(tmp.path().join("sollint.toml"), "").unwrap();
        assert_eq!(
            resolve_in(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("sollint.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let global_dir = Some(global.path().to_path_buf());

        assert_eq!(
            resolve_in(project.path(), None, global_dir.clone()),
            ConfigSource::Default
        );

        fs::write(global.path().join("config.toml"), "").unwrap();
        assert_eq!(
            resolve_in(project.path(), None, global_dir.clone()),
            ConfigSource::Global(global.path().join("config.toml"))
        );

        fs::write(project.path().join("sollint.toml"), "").unwrap();
        assert!(matches!(
            resolve_in(project.path(), None, global_dir),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn default_source_loads_defaults() {
        assert!(ConfigSource::Default.path().is_none());
        let config = ConfigSource::Default.load().unwrap();
        assert_eq!(config.header.author, "dYdX");
    }

    #[test]
    fn load_reads_file_and_anchors_root() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("sollint.toml"),
            "[analyzer]\nroot = \"protocol\"\n\n[coverage]\nprecondition_style = \"inline\"\n",
        )
        .unwrap();

        let config = load(tmp.path(), None).unwrap();
        assert_eq!(config.analyzer.root, tmp.path().join("protocol"));
        assert_eq!(config.coverage.precondition_style, PreconditionStyle::Inline);
    }

    #[test]
    fn load_reports_bad_file() {
        let tmp = TempDir::new().unwrap();
        let bad = tmp.path().join("bad.toml");
        fs::write(&bad, "[analyzer\n").unwrap();

        let err = load(tmp.path(), Some(&bad)).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
