// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for auditbot
//!
//! Read from `auditbot.toml`. A missing file yields the defaults; every
//! section and field is optional.

use crate::compliance::ClassificationTable;
use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "auditbot.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Alternate rule classification table (TOML); built-in table if unset
    #[serde(default)]
    pub classification: Option<PathBuf>,

    /// Directory scanning settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Which files a directory scan picks up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions parsed as HTML
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names never descended into
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude: default_exclude(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["html".to_string(), "htm".to_string()]
}

fn default_exclude() -> Vec<String> {
    [
        "node_modules", ".git", "target", "dist", "build",
        "_build", "vendor", ".next", ".nuxt", "coverage",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// The classification table this configuration selects
    pub fn classification_table(&self) -> Result<ClassificationTable> {
        match &self.classification {
            Some(path) => ClassificationTable::load(path),
            None => Ok(ClassificationTable::builtin()),
        }
    }
}

/// Load configuration from a path
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| AuditError::Config(format!("TOML parse error in {}: {}", path.display(), e)))
}
