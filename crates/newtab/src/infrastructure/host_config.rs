//! TOML settings for the headless host.
//!
//! These are settings of the *host*, not user preferences of the page: where
//! the key-value data lives, what the "system" colour-scheme preference is,
//! and how verbose logging should be.  They are read from `host.toml` in the
//! first of `$XDG_CONFIG_HOME/newtab`, `%APPDATA%\newtab` or
//! `~/.config/newtab` that the environment can name.
//!
//! ```toml
//! [storage]
//! data_dir = "/home/me/.local/share/newtab"
//!
//! [appearance]
//! prefers_dark = true
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Every section and field is optional.  Fields annotated with
//! `#[serde(default)]` take their `Default` value when absent, so an empty
//! or missing file yields [`HostConfig::default()`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for host configuration file operations.
#[derive(Debug, Error)]
pub enum HostConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing host config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse host config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub appearance: AppearanceSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageSection {
    /// Directory holding the key-value files.  Defaults to the platform
    /// config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppearanceSection {
    /// Stands in for the browser's `prefers-color-scheme: dark` query.
    #[serde(default)]
    pub prefers_dark: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    /// `tracing` filter directive: `"error"`, `"warn"`, `"info"`, `"debug"`,
    /// `"trace"` or a full `EnvFilter` string.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Platform directory holding `host.toml` and, by default, the data files.
///
/// # Errors
///
/// Returns [`HostConfigError::NoPlatformConfigDir`] when the base directory
/// cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, HostConfigError> {
    platform_config_dir().ok_or(HostConfigError::NoPlatformConfigDir)
}

/// Default location of the host configuration file.
pub fn host_config_path() -> Result<PathBuf, HostConfigError> {
    Ok(config_dir()?.join("host.toml"))
}

/// Reads the host configuration from `path`, returning the defaults if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`HostConfigError::Io`] for file-system errors other than "not
/// found", and [`HostConfigError::Parse`] if the TOML is malformed.
pub fn load_host_config(path: &Path) -> Result<HostConfig, HostConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HostConfig::default()),
        Err(source) => Err(HostConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl HostConfig {
    /// Data directory to use: `data_dir` when set, otherwise the platform
    /// config directory.
    pub fn data_dir(&self) -> Result<PathBuf, HostConfigError> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => config_dir(),
        }
    }
}

fn platform_config_dir() -> Option<PathBuf> {
    config_dir_from(|name| std::env::var_os(name))
}

/// `$XDG_CONFIG_HOME/newtab`, else `%APPDATA%\newtab`, else
/// `$HOME/.config/newtab`.  `var` looks up one environment variable; empty
/// values count as unset.
fn config_dir_from(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let set = |name: &str| var(name).filter(|value| !value.is_empty()).map(PathBuf::from);
    let base = set("XDG_CONFIG_HOME")
        .or_else(|| set("APPDATA"))
        .or_else(|| set("HOME").map(|home| home.join(".config")))?;
    Some(base.join("newtab"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
