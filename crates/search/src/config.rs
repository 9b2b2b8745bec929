//! Search configuration via `pantry.toml`
//!
//! On first run a default `pantry.toml` is written next to the data. To
//! change settings, edit the file and restart.

use pantry_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pantry.toml";

/// Configuration loaded from `pantry.toml`.
///
/// # Example
///
/// ```toml
/// recipes = "data/recipes.json"
/// # index = "data/index.json"
/// cache = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PantryConfig {
    /// Record collection to load.
    #[serde(default = "default_recipes_path")]
    pub recipes: PathBuf,
    /// Precomputed index artifact; loaded instead of rebuilding when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<PathBuf>,
    /// Wire the result cache into the query path.
    #[serde(default = "default_cache")]
    pub cache: bool,
}

fn default_recipes_path() -> PathBuf {
    PathBuf::from("data/recipes.json")
}

fn default_cache() -> bool {
    true
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            recipes: default_recipes_path(),
            index: None,
            cache: default_cache(),
        }
    }
}

impl PantryConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Pantry search configuration
#
# Recipe collection (JSON array, or an object with a "recipes" array)
recipes = "data/recipes.json"

# Precomputed n-gram index written by `pantry build-index`.
# When set, the index is loaded as-is instead of being rebuilt at startup.
# index = "data/index.json"

# Memoize main-keyword results for the lifetime of the loaded index
# (default: true)
cache = true
"#
    }

    /// Builder: set the recipe collection path
    pub fn with_recipes(mut self, path: impl Into<PathBuf>) -> Self {
        self.recipes = path.into();
        self
    }

    /// Builder: set the index artifact path
    pub fn with_index(mut self, path: impl Into<PathBuf>) -> Self {
        self.index = Some(path.into());
        self
    }

    /// Builder: enable or disable the result cache
    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: PantryConfig = toml::from_str(&content).map_err(|e| {
            Error::InvalidConfig(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot name a collection
    pub fn validate(&self) -> Result<()> {
        if self.recipes.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "'recipes' must name a file".to_string(),
            ));
        }
        if matches!(&self.index, Some(p) if p.as_os_str().is_empty()) {
            return Err(Error::InvalidConfig(
                "'index' must name a file when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::SerializationError(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
