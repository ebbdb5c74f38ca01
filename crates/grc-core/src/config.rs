//! Explorer configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/grc-explorer/config.toml`
//! - macOS: `~/Library/Application Support/grc-explorer/config.toml`
//! - Windows: `%APPDATA%\grc-explorer\config.toml`
//!
//! Every field is optional in the file; missing fields take their defaults.
//!
//! # Examples
//!
//! ```
//! use grc_core::ExplorerConfig;
//! use std::time::Duration;
//!
//! let config = ExplorerConfig::default();
//! assert!(config.enable_timestamp);
//! assert_eq!(config.listing_timeout(), Some(Duration::from_secs(5)));
//! assert_eq!(config.read_timeout(), None);
//!
//! let parsed: ExplorerConfig = toml::from_str(r#"
//!     save_dir = "/tmp/downloads"
//!     listing_timeout_secs = 0
//! "#).unwrap();
//! assert_eq!(parsed.listing_timeout(), None);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "grc-explorer";

/// Upper bound accepted for any timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Runtime configuration of the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Directory binary file-browser downloads are saved to without prompting.
    ///
    /// If `None`, every download prompts for a location.
    /// Default: None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<PathBuf>,

    /// Prefix terminal chat lines with `[HH:MM:SS]`.
    ///
    /// Default: true
    pub enable_timestamp: bool,

    /// Timeout for remote file-browser listings, `0` disables it.
    ///
    /// Default: 5 seconds
    pub listing_timeout_secs: u64,

    /// Timeout for reads waiting on a pushed reply, `0` disables it.
    ///
    /// Default: 0 (wait indefinitely)
    pub read_timeout_secs: u64,

    /// Nickname announced after connecting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            save_dir: None,
            enable_timestamp: true,
            listing_timeout_secs: 5,
            read_timeout_secs: 0,
            nickname: None,
        }
    }
}

impl ExplorerConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use grc_core::ExplorerConfig;
    ///
    /// let config = ExplorerConfig::builder()
    ///     .save_dir("/tmp/grc")
    ///     .enable_timestamp(false)
    ///     .build();
    ///
    /// assert_eq!(config.save_dir.as_deref(), Some(std::path::Path::new("/tmp/grc")));
    /// assert!(!config.enable_timestamp);
    /// ```
    #[must_use]
    pub fn builder() -> ExplorerConfigBuilder {
        ExplorerConfigBuilder::new()
    }

    /// Returns the file-browser listing timeout, if enabled.
    #[must_use]
    pub const fn listing_timeout(&self) -> Option<Duration> {
        secs_to_timeout(self.listing_timeout_secs)
    }

    /// Returns the pushed-reply read timeout, if enabled.
    #[must_use]
    pub const fn read_timeout(&self) -> Option<Duration> {
        secs_to_timeout(self.read_timeout_secs)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if a timeout exceeds
    /// [`MAX_TIMEOUT_SECS`] or the save directory is not absolute.
    pub fn validate(&self) -> Result<()> {
        if self.listing_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(Error::ConfigError {
                message: format!("listing_timeout_secs cannot exceed {MAX_TIMEOUT_SECS} seconds"),
            });
        }

        if self.read_timeout_secs > MAX_TIMEOUT_SECS {
            return Err(Error::ConfigError {
                message: format!("read_timeout_secs cannot exceed {MAX_TIMEOUT_SECS} seconds"),
            });
        }

        if let Some(dir) = &self.save_dir
            && !dir.is_absolute()
        {
            return Err(Error::ConfigError {
                message: format!("save_dir must be an absolute path: {}", dir.display()),
            });
        }

        Ok(())
    }

    /// Returns the platform-specific configuration file path.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if the platform has no config directory.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| Error::ConfigError {
            message: "failed to determine config directory".to_string(),
        })?;

        Ok(config_dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file exists but cannot be read, and
    /// `Error::ConfigError` if it cannot be parsed or fails validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(path.display().to_string(), e))?;

        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;

        config.validate()?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if validation, serialization, or the write fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::io(parent.display().to_string(), e))?;
        }

        let text = toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize config: {e}"),
        })?;

        std::fs::write(path, text).map_err(|e| Error::io(path.display().to_string(), e))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }
}

const fn secs_to_timeout(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

/// Builder for [`ExplorerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ExplorerConfigBuilder {
    config: ExplorerConfig,
}

impl ExplorerConfigBuilder {
    /// Creates a builder starting from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the download directory.
    #[must_use]
    pub fn save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.save_dir = Some(dir.into());
        self
    }

    /// Enables or disables chat timestamps.
    #[must_use]
    pub const fn enable_timestamp(mut self, enabled: bool) -> Self {
        self.config.enable_timestamp = enabled;
        self
    }

    /// Sets the file-browser listing timeout; `None` disables it.
    #[must_use]
    pub fn listing_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.listing_timeout_secs = timeout.map_or(0, |d| d.as_secs().max(1));
        self
    }

    /// Sets the pushed-reply read timeout; `None` disables it.
    #[must_use]
    pub fn read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.read_timeout_secs = timeout.map_or(0, |d| d.as_secs().max(1));
        self
    }

    /// Sets the nickname.
    #[must_use]
    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.config.nickname = Some(nickname.into());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ExplorerConfig {
        self.config
    }
}
