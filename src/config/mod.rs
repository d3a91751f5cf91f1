//! Configuration system for pomassert.
//!
//! This module provides the configuration structure with sensible defaults
//! and TOML (de)serialization via serde. Configuration is read from
//! `~/.config/pomassert/config.toml`; every field is optional.
//!
//! # Example
//!
//! ```
//! use pomassert::config::Config;
//! use pomassert::path::PathMatching;
//!
//! let config = Config::default();
//! assert_eq!(config.default_document, "pom.xml");
//! assert_eq!(config.path_matching, PathMatching::Segment);
//!
//! let custom = Config {
//!     path_matching: PathMatching::Literal,
//!     ..Config::default()
//! };
//! assert_eq!(custom.module_descriptor, "pom.xml");
//! ```

use crate::path::PathMatching;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for pomassert.
///
/// # Fields
///
/// * `default_document` - Descriptor opened when no file is given (default: "pom.xml")
/// * `path_matching` - "segment" or "literal" given-node matching (default: "segment")
/// * `module_root` - Directory module checks resolve against (default: ".")
/// * `module_descriptor` - Descriptor file name inside a module (default: "pom.xml")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Descriptor opened when no file is given
    #[serde(default = "default_document")]
    pub default_document: String,

    /// How given nodes and tags are matched against paths
    #[serde(default)]
    pub path_matching: PathMatching,

    /// Directory module checks resolve against
    #[serde(default = "default_module_root")]
    pub module_root: PathBuf,

    /// Descriptor file name inside a module directory
    #[serde(default = "default_module_descriptor")]
    pub module_descriptor: String,
}

fn default_document() -> String {
    "pom.xml".to_string()
}

fn default_module_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_module_descriptor() -> String {
    "pom.xml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_document: default_document(),
            path_matching: PathMatching::default(),
            module_root: default_module_root(),
            module_descriptor: default_module_descriptor(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/pomassert/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("pomassert");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "ignoring invalid config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to `path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }
}
