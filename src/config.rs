//! Configuration for the import rewrite.
//!
//! The only setting is the list of watched modules: the module specifiers
//! whose imports get split into per-function imports. It can come from a
//! JSON file, from the command line, or fall back to the lodash defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Module specifiers watched when no configuration is given.
pub const DEFAULT_WATCHED_MODULES: [&str; 2] = ["lodash", "lodash/fp"];

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = ".barrelsplitrc.json";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content.
    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The watched module list has no usable entries.
    #[error("No watched modules configured")]
    EmptyWatchList,
}

/// Result type alias for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// On-disk configuration.
///
/// ```
/// use barrelsplit::config::Config;
///
/// let config = Config::from_json(r#"{"watchedModules": ["ramda"]}"#).unwrap();
/// assert_eq!(config.watched_modules, vec!["ramda".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Module specifiers whose imports are rewritten.
    pub watched_modules: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watched_modules: DEFAULT_WATCHED_MODULES
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Parses a config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses config from a JSON string. Missing keys take their defaults.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Loads [`CONFIG_FILE_NAME`] from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> ConfigResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            debug!(path = %path.display(), "loading config file");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Replaces the watched module list when `modules` is non-empty.
    pub fn with_watched_modules(mut self, modules: Vec<String>) -> Self {
        if !modules.is_empty() {
            self.watched_modules = modules;
        }
        self
    }

    /// Builds the watched module set, rejecting an empty list.
    pub fn watched(&self) -> ConfigResult<WatchedModules> {
        let watched = WatchedModules::new(self.watched_modules.iter().cloned());
        if watched.is_empty() {
            return Err(ConfigError::EmptyWatchList);
        }
        Ok(watched)
    }
}

/// Set of module specifiers that trigger rewriting.
///
/// Membership is exact string equality: `lodash/fp/get` is not covered by
/// a `lodash/fp` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedModules {
    modules: Vec<String>,
}

impl WatchedModules {
    /// Build a set from module specifiers. Blank entries and duplicates are
    /// dropped; order is kept.
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for module in modules {
            let module = module.into().trim().to_string();
            if !module.is_empty() && !unique.contains(&module) {
                unique.push(module);
            }
        }
        Self { modules: unique }
    }

    /// Returns true if `source` is exactly one of the watched modules.
    pub fn contains(&self, source: &str) -> bool {
        self.modules.iter().any(|m| m == source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for WatchedModules {
    fn default() -> Self {
        Self::new(DEFAULT_WATCHED_MODULES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.watched_modules, vec!["lodash", "lodash/fp"]);
        assert_eq!(config.watched().unwrap(), WatchedModules::default());
    }

    #[test]
    fn test_exact_membership() {
        let watched = WatchedModules::default();
        assert!(watched.contains("lodash"));
        assert!(watched.contains("lodash/fp"));
        assert!(!watched.contains("lodash/get"));
        assert!(!watched.contains("lodash/fp/get"));
        assert!(!watched.contains("lodash-es"));
    }

    #[test]
    fn test_new_dedups_and_trims() {
        let watched = WatchedModules::new(["ramda", " ramda ", "", "lodash"]);
        assert_eq!(watched.iter().collect::<Vec<_>>(), vec!["ramda", "lodash"]);
        assert_eq!(watched.len(), 2);
    }

    #[test]
    fn test_from_json_missing_key_uses_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_from_json_invalid() {
        let result = Config::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_empty_watch_list_rejected() {
        let config = Config::from_json(r#"{"watchedModules": []}"#).unwrap();
        assert!(matches!(config.watched(), Err(ConfigError::EmptyWatchList)));
    }

    #[test]
    fn test_cli_override() {
        let config = Config::default().with_watched_modules(vec!["underscore".to_string()]);
        assert_eq!(config.watched_modules, vec!["underscore"]);

        let unchanged = Config::default().with_watched_modules(vec![]);
        assert_eq!(unchanged, Config::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"watchedModules": ["lodash", "lodash/fp", "lodash-es"]}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.watched().unwrap().contains("lodash-es"));
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());

        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"watchedModules": ["ramda"]}"#,
        )
        .unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.watched_modules, vec!["ramda"]);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
