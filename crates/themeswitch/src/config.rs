//! Configuration.
//!
//! A YAML file with every field optional:
//!
//! ```yaml
//! storage_key: theme
//! origin: https://example.com
//! store_path: /var/lib/site/theme.json
//! marker_class: dark
//! poll_interval_ms: 1000
//! stylesheets:
//!   light: styles/light.yaml
//!   dark: styles/dark.yaml
//! ```
//!
//! Lookup order for [`Config::discover`]: the file named by
//! `THEMESWITCH_CONFIG`, then `<config_dir>/themeswitch/config.yaml`, then
//! built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::preference::DEFAULT_STORAGE_KEY;
use crate::storage::{FileStore, StorageError};
use crate::theme::{AdaptiveTheme, Stylesheet, StylesheetError};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "THEMESWITCH_CONFIG";

/// Class toggled on the document root when dark mode is applied.
pub const DEFAULT_MARKER_CLASS: &str = "dark";

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "local";

const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Paths to the light and dark stylesheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetPaths {
    pub light: PathBuf,
    pub dark: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Key the preference is stored under.
    pub storage_key: String,
    /// Scope for the store; each origin has its own file.
    pub origin: String,
    /// Explicit store file, overriding the per-origin default location.
    pub store_path: Option<PathBuf>,
    /// Class toggled on `<html>` by the web binding.
    pub marker_class: String,
    /// How often `watch` polls the OS preference.
    pub poll_interval_ms: u64,
    pub stylesheets: Option<StylesheetPaths>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            store_path: None,
            marker_class: DEFAULT_MARKER_CLASS.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            stylesheets: None,
        }
    }
}

impl Config {
    /// Parses YAML source. Relative stylesheet paths stay relative.
    pub fn parse(source: &str, path: &Path) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a config file.
    ///
    /// Relative stylesheet and store paths are resolved against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&source, path)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Finds and loads the config file, or returns defaults if there is none.
    ///
    /// A file named by `THEMESWITCH_CONFIG` must exist; the default location
    /// is optional.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    fn rebase(&mut self, base: &Path) {
        if let Some(store) = &mut self.store_path {
            if store.is_relative() {
                *store = base.join(&*store);
            }
        }
        if let Some(sheets) = &mut self.stylesheets {
            if sheets.light.is_relative() {
                sheets.light = base.join(&sheets.light);
            }
            if sheets.dark.is_relative() {
                sheets.dark = base.join(&sheets.dark);
            }
        }
    }

    /// The store for this configuration.
    pub fn file_store(&self) -> Result<FileStore, StorageError> {
        match &self.store_path {
            Some(path) => Ok(FileStore::new(path)),
            None => FileStore::for_origin(&self.origin),
        }
    }

    /// Terminal themes: the configured stylesheets, or the built-in pair.
    pub fn adaptive_theme(&self) -> Result<AdaptiveTheme, StylesheetError> {
        match &self.stylesheets {
            Some(paths) => {
                let light = Stylesheet::load(&paths.light)?.into_theme()?;
                let dark = Stylesheet::load(&paths.dark)?.into_theme()?;
                Ok(AdaptiveTheme::new(light, dark))
            }
            None => Ok(AdaptiveTheme::default()),
        }
    }

    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.poll_interval_ms)
    }
}

/// `<config_dir>/themeswitch/config.yaml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("themeswitch").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.storage_key, "theme");
        assert_eq!(config.marker_class, "dark");
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("origin: https://example.com\n", Path::new("c.yaml")).unwrap();
        assert_eq!(config.origin, "https://example.com");
        assert_eq!(config.storage_key, "theme");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(
            Config::parse("", Path::new("c.yaml")).unwrap(),
            Config::default()
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::parse("colour: red\n", Path::new("c.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_rebases_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "store_path: state/theme.json\nstylesheets:\n  light: light.yaml\n  dark: /abs/dark.yaml\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.store_path.as_deref(),
            Some(dir.path().join("state/theme.json").as_path())
        );
        let sheets = config.stylesheets.unwrap();
        assert_eq!(sheets.light, dir.path().join("light.yaml"));
        assert_eq!(sheets.dark, PathBuf::from("/abs/dark.yaml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Config::load(Path::new("/nonexistent/themeswitch.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_adaptive_theme_from_stylesheets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("light.yaml"), "mode: { fg: blue }\n").unwrap();
        fs::write(dir.path().join("dark.yaml"), "mode: { fg: yellow }\n").unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "stylesheets:\n  light: light.yaml\n  dark: dark.yaml\n",
        )
        .unwrap();

        let themes = Config::load(&path).unwrap().adaptive_theme().unwrap();
        assert!(themes.light().styles().has("mode"));
        assert!(themes.dark().styles().has("mode"));
    }

    #[test]
    fn test_explicit_store_path() {
        let config = Config {
            store_path: Some(PathBuf::from("/tmp/x.json")),
            ..Config::default()
        };
        assert_eq!(
            config.file_store().unwrap().path(),
            Path::new("/tmp/x.json")
        );
    }
}
