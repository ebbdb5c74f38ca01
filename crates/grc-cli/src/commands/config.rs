//! `config show`, `config path`, and `config init`.

use anyhow::{Context, Result, bail};
use grc_core::ExplorerConfig;
use std::path::{Path, PathBuf};
use tracing::info;

fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => ExplorerConfig::default_path().context("no configuration directory"),
    }
}

/// Runs `config show`: loads, validates, and prints the effective
/// configuration as TOML.
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or fails validation.
pub fn show(path: Option<&Path>) -> Result<String> {
    let path = resolve_path(path)?;
    let config = ExplorerConfig::load_from(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid configuration in {}", path.display()))?;

    let body = toml::to_string_pretty(&config).context("failed to serialize configuration")?;
    Ok(format!("# {}\n{body}", path.display()))
}

/// Runs `config path`.
///
/// # Errors
///
/// Returns an error if the platform has no configuration directory.
pub fn default_path() -> Result<String> {
    Ok(resolve_path(None)?.display().to_string())
}

/// Runs `config init`.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or it
/// cannot be written.
pub fn init(path: Option<&Path>, force: bool) -> Result<String> {
    let path = resolve_path(path)?;
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }

    ExplorerConfig::default()
        .save_to(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Wrote default configuration to {}", path.display());
    Ok(format!("Wrote {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_show_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let text = show(Some(&dir.path().join("config.toml"))).unwrap();
        assert!(text.contains("enable_timestamp = true"));
        assert!(text.contains("listing_timeout_secs = 5"));
    }

    #[test]
    fn test_show_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "read_timeout_secs = 100000\n").unwrap();

        let err = show(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("grc").join("config.toml");

        init(Some(&path), false).unwrap();
        assert!(path.exists());
        assert!(init(Some(&path), false).is_err());
        init(Some(&path), true).unwrap();

        let loaded = ExplorerConfig::load_from(&path).unwrap();
        assert_eq!(loaded, ExplorerConfig::default());
    }
}
