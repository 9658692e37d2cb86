//! Application configuration lookup
//!
//! Configuration is a flat table of string keys to string values. Values come
//! from bundled defaults, then an optional TOML file in the XDG config
//! directory (`~/.config/wikiplaces/config.toml` on Linux), then explicit
//! overrides such as CLI flags.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default base URL for the places resource
const DEFAULT_BASE_URL_PLACES: &str = "https://raw.githubusercontent.com/abnamrocoesd/assignment-ios";

/// Default prefix for Wikipedia deep links
const DEFAULT_SCHEMA_URL_WIKIPEDIA: &str =
    "wikipedia://places?WMFArticleURL=https://en.wikipedia.org/wiki/";

/// Name of the config file inside the config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not a flat table of strings
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Keys understood by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Base URL that hosts the places document
    BaseUrlPlaces,
    /// Prefix used to build Wikipedia deep links
    SchemaUrlWikipedia,
}

impl ConfigKey {
    /// Returns the key as it appears in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::BaseUrlPlaces => "BaseUrlPlaces",
            ConfigKey::SchemaUrlWikipedia => "SchemaUrlWikipedia",
        }
    }
}

/// Key to string lookup table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    values: HashMap<String, String>,
}

impl Configuration {
    /// Creates a configuration with no keys at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a configuration holding the bundled defaults
    pub fn bundled() -> Self {
        Self::empty()
            .with_value(ConfigKey::BaseUrlPlaces, DEFAULT_BASE_URL_PLACES)
            .with_value(ConfigKey::SchemaUrlWikipedia, DEFAULT_SCHEMA_URL_WIKIPEDIA)
    }

    /// Loads the bundled defaults overlaid with a config file
    ///
    /// # Arguments
    /// * `path` - Explicit config file; when `None` the XDG default location is
    ///   used and a missing file is silently ignored
    ///
    /// # Returns
    /// * `Ok(Configuration)` with file values taking precedence over defaults
    /// * `Err(ConfigError)` if an explicit file is missing or any file is malformed
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::bundled();

        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                config.merge_toml(&content)?;
            }
            None => {
                if let Some(default_path) = Self::default_path() {
                    if let Ok(content) = fs::read_to_string(&default_path) {
                        tracing::debug!(path = %default_path.display(), "Loading config file");
                        config.merge_toml(&content)?;
                    }
                }
            }
        }

        Ok(config)
    }

    /// Returns the XDG config file location, if a home directory exists
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "wikiplaces")?;
        Some(project_dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Overlays values parsed from a TOML document of `Key = "value"` pairs
    pub fn merge_toml(&mut self, content: &str) -> Result<(), ConfigError> {
        let parsed: HashMap<String, String> = toml::from_str(content)?;
        self.values.extend(parsed);
        Ok(())
    }

    /// Returns a copy of this configuration with one key set
    pub fn with_value(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.values.insert(key.as_str().to_string(), value.into());
        self
    }

    /// Looks up a value by key
    pub fn value(&self, key: ConfigKey) -> Option<&str> {
        self.values.get(key.as_str()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_has_both_keys() {
        let config = Configuration::bundled();
        assert_eq!(
            config.value(ConfigKey::BaseUrlPlaces),
            Some(DEFAULT_BASE_URL_PLACES)
        );
        assert_eq!(
            config.value(ConfigKey::SchemaUrlWikipedia),
            Some(DEFAULT_SCHEMA_URL_WIKIPEDIA)
        );
    }

    #[test]
    fn test_empty_has_no_keys() {
        let config = Configuration::empty();
        assert!(config.value(ConfigKey::BaseUrlPlaces).is_none());
        assert!(config.value(ConfigKey::SchemaUrlWikipedia).is_none());
    }

    #[test]
    fn test_with_value_overrides() {
        let config = Configuration::bundled().with_value(ConfigKey::BaseUrlPlaces, "http://localhost");
        assert_eq!(config.value(ConfigKey::BaseUrlPlaces), Some("http://localhost"));
    }

    #[test]
    fn test_merge_toml_overlays_values() {
        let mut config = Configuration::bundled();
        config
            .merge_toml("BaseUrlPlaces = \"https://example.com/places\"\n")
            .expect("TOML should parse");

        assert_eq!(
            config.value(ConfigKey::BaseUrlPlaces),
            Some("https://example.com/places")
        );
        assert_eq!(
            config.value(ConfigKey::SchemaUrlWikipedia),
            Some(DEFAULT_SCHEMA_URL_WIKIPEDIA)
        );
    }

    #[test]
    fn test_merge_toml_rejects_non_string_values() {
        let mut config = Configuration::empty();
        let result = config.merge_toml("BaseUrlPlaces = 42\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "SchemaUrlWikipedia = \"wiki://\"\n").expect("Should write config");

        let config = Configuration::load(Some(&path)).expect("Load should succeed");

        assert_eq!(config.value(ConfigKey::SchemaUrlWikipedia), Some("wiki://"));
        assert_eq!(
            config.value(ConfigKey::BaseUrlPlaces),
            Some(DEFAULT_BASE_URL_PLACES)
        );
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing.toml");

        let result = Configuration::load(Some(&path));

        assert!(matches!(result, Err(ConfigError::Io { .. })));

        let message = result.unwrap_err().to_string();
        assert!(message.starts_with("Failed to read config file "));
        assert!(message.contains("missing.toml"));
    }

    #[test]
    fn test_default_path_mentions_project() {
        if let Some(path) = Configuration::default_path() {
            let path_str = path.to_string_lossy();
            assert!(path_str.contains("wikiplaces"));
            assert!(path_str.ends_with(CONFIG_FILE_NAME));
        }
        // Passes when no home directory is available (e.g. in CI)
    }
}
