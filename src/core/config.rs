//! Loader configuration.
//!
//! Everything the dispatcher needs to know about an installation lives here:
//! where the installation root is, what the system's own top-level namespace
//! is called, and how the three root directories are named on disk.
//!
//! The own search roots are always exactly `core` then `plugins`. Only their
//! directory names are tunable; the current directory is never searched.

use crate::core::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the installation root when no config path is given.
pub const CONFIG_FILE: &str = "symload.toml";

/// Directory names of the three search roots, relative to the install root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RootDirs {
    pub core: String,
    pub plugins: String,
    pub vendor: String,
}

impl Default for RootDirs {
    fn default() -> Self {
        Self {
            core: "core".to_string(),
            plugins: "plugins".to_string(),
            vendor: "libs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub install_root: PathBuf,
    pub top_namespace: String,
    pub plugins_segment: String,
    pub source_extension: String,
    pub roots: RootDirs,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            install_root: PathBuf::from("."),
            top_namespace: "App".to_string(),
            plugins_segment: "Plugins".to_string(),
            source_extension: "inc".to_string(),
            roots: RootDirs::default(),
        }
    }
}

impl LoaderConfig {
    pub fn for_root(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            ..Self::default()
        }
    }

    pub fn with_top_namespace(mut self, top: &str) -> Self {
        self.top_namespace = top.to_string();
        self
    }

    pub fn with_source_extension(mut self, ext: &str) -> Self {
        self.source_extension = ext.to_string();
        self
    }

    /// Read a TOML config file. A relative `install_root` is taken relative to
    /// the directory holding the file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path)?;
        let mut config: LoaderConfig =
            toml::from_str(&content).map_err(|e| LoadError::Config(e.to_string()))?;

        if config.install_root.is_relative() {
            if let Some(parent) = path.parent() {
                config.install_root = parent.join(&config.install_root);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load `symload.toml` from the install root if present, otherwise defaults.
    pub fn discover(install_root: &Path) -> Result<Self, LoadError> {
        let config_path = install_root.join(CONFIG_FILE);
        if config_path.exists() {
            return Self::load(&config_path);
        }

        // No config file = defaults rooted here (not an error)
        Ok(Self::for_root(install_root))
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if !is_identifier(&self.top_namespace) {
            return Err(LoadError::Config(format!(
                "top_namespace must be a non-empty identifier, got \"{}\"",
                self.top_namespace
            )));
        }
        if !is_identifier(&self.plugins_segment) {
            return Err(LoadError::Config(format!(
                "plugins_segment must be a non-empty identifier, got \"{}\"",
                self.plugins_segment
            )));
        }
        if self.source_extension.is_empty()
            || self.source_extension.contains(['.', '/', '\\'])
        {
            return Err(LoadError::Config(format!(
                "source_extension must be a bare extension, got \"{}\"",
                self.source_extension
            )));
        }
        for (key, dir) in [
            ("core", &self.roots.core),
            ("plugins", &self.roots.plugins),
            ("vendor", &self.roots.vendor),
        ] {
            if dir.is_empty() || dir.contains(['/', '\\']) || dir == "." || dir == ".." {
                return Err(LoadError::Config(format!(
                    "roots.{} must be a single directory name, got \"{}\"",
                    key, dir
                )));
            }
        }
        Ok(())
    }
}

// Underscores are path separators in the naming convention, so an identifier
// containing one could never match itself after mapping.
fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}
