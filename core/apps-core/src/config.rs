//! Configuration loading for mac-apps.
//!
//! Lookup order: explicit path, then `MAC_APPS_CONFIG`, then
//! `~/.config/mac-apps/config.json`. A missing file yields defaults.

use crate::error::{AppsError, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV_VAR: &str = "MAC_APPS_CONFIG";

const DEFAULT_WINDOW_QUERY_PROGRAM: &str = "yabai";
const DEFAULT_WINDOW_QUERY_TIMEOUT_MS: u64 = 5000;
const DEFAULT_BUNDLE_EXTENSION: &str = "app";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppsConfig {
    pub window_query: WindowQueryConfig,
    /// Directories scanned (non-recursively) for installed bundles.
    pub application_dirs: Vec<PathBuf>,
    /// Extension marking an application bundle, without the dot.
    pub bundle_extension: String,
}

impl Default for AppsConfig {
    fn default() -> Self {
        Self {
            window_query: WindowQueryConfig::default(),
            application_dirs: vec![
                PathBuf::from("/System/Applications"),
                PathBuf::from("/Applications"),
            ],
            bundle_extension: DEFAULT_BUNDLE_EXTENSION.to_string(),
        }
    }
}

/// External window-query tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowQueryConfig {
    pub program: String,
    pub args: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for WindowQueryConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_WINDOW_QUERY_PROGRAM.to_string(),
            args: vec![
                "-m".to_string(),
                "query".to_string(),
                "--windows".to_string(),
            ],
            timeout_ms: DEFAULT_WINDOW_QUERY_TIMEOUT_MS,
        }
    }
}

impl WindowQueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Returns the default config file path (~/.config/mac-apps/config.json).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("mac-apps").join("config.json"))
}

/// Resolves which config file to read, honoring the explicit path and env override.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(value) if !value.is_empty() => Some(PathBuf::from(value)),
        _ => default_config_path(),
    }
}

/// Loads the configuration at `path`. A missing file yields defaults.
pub fn load_config(path: &Path) -> Result<AppsConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(AppsConfig::default()),
        Err(err) => {
            return Err(AppsError::Io {
                context: format!("reading config {}", path.display()),
                source: err,
            })
        }
    };

    serde_json::from_str(&content).map_err(|e| AppsError::ConfigMalformed {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

/// Loads the configuration, falling back to defaults (with a warning) on any error.
pub fn load_config_or_default(explicit: Option<&Path>) -> AppsConfig {
    let Some(path) = resolve_config_path(explicit) else {
        return AppsConfig::default();
    };
    match load_config(&path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to load config; using defaults");
            AppsConfig::default()
        }
    }
}
