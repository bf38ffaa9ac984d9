//! User configuration loaded from a TOML file.
//!
//! Looked up at `$XDG_CONFIG_HOME/medialib-scan/config.toml`, falling back to
//! `~/.config/medialib-scan/config.toml`. A missing file means defaults.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::scanner::ContentType;

const APP_DIR: &str = "medialib-scan";
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`AppConfig`]
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Keep the dialog open after the scan finishes
    pub background_update: bool,
    /// UI refresh interval in milliseconds
    pub tick_ms: u64,
    /// Content type assumed for sources given on the command line
    pub content: ContentType,
    /// Where the library JSON is stored (defaults to the XDG data dir)
    pub library_path: Option<PathBuf>,
    /// Tracing filter used when `MEDIALIB_SCAN_LOG` is unset
    pub log_level: String,
    /// Log file (defaults to the XDG cache dir)
    pub log_file: Option<PathBuf>,
    /// default, dark, light, colorblind
    pub color_scheme: String,
    /// File extensions treated as media, lowercase without the dot
    pub extensions: Vec<String>,
    /// Overrides for the dialog's message strings, keyed by message key
    pub strings: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            background_update: false,
            tick_ms: 50,
            content: ContentType::Movies,
            library_path: None,
            log_level: "info".to_string(),
            log_file: None,
            color_scheme: "default".to_string(),
            extensions: [
                "mkv", "mp4", "avi", "mov", "wmv", "m4v", "mpg", "mpeg", "ts", "webm", "iso",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            strings: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_dir().join(CONFIG_FILE),
        };

        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn library_path(&self) -> PathBuf {
        self.library_path
            .clone()
            .unwrap_or_else(|| data_dir().join("library.json"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| cache_dir().join("medialib-scan.log"))
    }
}

fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    if let Ok(dir) = std::env::var(var) {
        PathBuf::from(dir).join(APP_DIR)
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(fallback).join(APP_DIR)
    } else {
        std::env::temp_dir().join(APP_DIR)
    }
}

fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn cache_dir() -> PathBuf {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(!config.background_update);
        assert_eq!(config.tick_ms, 50);
        assert_eq!(config.content, ContentType::Movies);
        assert!(config.extensions.iter().any(|e| e == "mkv"));
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            background_update = true
            content = "tvshows"

            [strings]
            "scan.preparing" = "Getting ready"
            "#,
        )
        .unwrap();

        assert!(config.background_update);
        assert_eq!(config.content, ContentType::TvShows);
        assert_eq!(config.tick_ms, 50);
        assert_eq!(
            config.strings.get("scan.preparing").map(String::as_str),
            Some("Getting ready")
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tick_ms = \"fast\"").unwrap();

        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_explicit_library_path() {
        let config = AppConfig::from_toml("library_path = \"/tmp/lib.json\"").unwrap();
        assert_eq!(config.library_path(), PathBuf::from("/tmp/lib.json"));
    }
}
