//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a latex-outline.toml, and if present we load settings from there.
//! This provides the rescan frequency, whether inclusions are followed, and which extensions an
//! extensionless `\input` target may carry.

use crate::error::{Error, Result};
use crate::schedule::UpdateFrequency;
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "latex-outline.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from latex-outline.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "Medium".to_string())]
    /// Rescan frequency label: High, Medium, Low or On Save Only.
    pub update_frequency: String,
    #[facet(default = true)]
    /// Whether `\include` and `\input` are descended into.
    pub follow_inclusions: bool,
    #[facet(default = vec!["tex".to_string()])]
    /// Extensions tried for inclusion targets written without one.
    pub file_extensions: Vec<String>,
}

impl Default for Config {
    /// Every field at its `#[facet(default)]` value.
    ///
    /// # Panics
    ///
    /// Panics if the empty document cannot be parsed, i.e. a field lacks a default.
    fn default() -> Self {
        facet_toml::from_str::<Self>("").unwrap()
    }
}

impl Config {
    #[must_use]
    /// Load configuration from latex-outline.toml if present and valid, defaults otherwise.
    pub fn load() -> Self {
        fs::read_to_string(DEFAULT_CONFIG_FILE)
            .ok()
            .and_then(|contents| Self::from_toml(&contents).ok())
            .unwrap_or_default()
    }

    /// Load configuration from an explicitly named file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the file cannot be read and [`Error::Config`] if it does not
    /// parse or names an unknown update frequency.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        config
            .frequency()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid configuration.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// The configured rescan frequency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFrequency`] if the label is not recognised.
    pub fn frequency(&self) -> Result<UpdateFrequency> {
        UpdateFrequency::from_label(&self.update_frequency)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
