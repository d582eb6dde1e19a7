//! cheader configuration system
//!
//! Supports user-level and project-level configuration with merge semantics.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high -> low):
//! 1. CLI arguments
//! 2. Environment variables (CHEADER_PATH)
//! 3. Project-level (cheader.toml)
//! 4. User-level (~/.config/cheader/config.toml)
//! 5. Default values
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use cheader::util::config::load_config;
//!
//! let config = load_config(std::path::Path::new(".")).unwrap();
//! println!("search roots: {:?}", config.search.paths);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::frontend::comments::TranslateOptions;

/// Environment variable holding extra search roots
pub const SEARCH_PATH_ENV: &str = "CHEADER_PATH";

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "cheader.toml";

/// Configuration for cheader
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Comment translation settings
    #[serde(default)]
    pub translate: TranslateOptions,
    /// Module search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Module search configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Search roots, in priority order
    #[serde(default)]
    pub paths: Vec<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// Level name (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// One config file as written; unset keys leave the layer below untouched
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct ConfigLayer {
    #[serde(default)]
    pub translate: TranslateLayer,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub log: LogLayer,
}

/// `[translate]` keys of one config file
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
pub struct TranslateLayer {
    pub docstring: Option<bool>,
    pub preserve_whitespace: Option<bool>,
    pub coalesce: Option<bool>,
}

/// `[log]` keys of one config file
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct LogLayer {
    pub level: Option<String>,
}

impl Config {
    /// Overlay `layer` on top of `self`.
    ///
    /// Every key the layer sets wins, defaults included. Search paths from the
    /// layer come first.
    pub fn merge(
        mut self,
        layer: ConfigLayer,
    ) -> Config {
        let translate = layer.translate;
        if let Some(docstring) = translate.docstring {
            self.translate.docstring = docstring;
        }
        if let Some(preserve) = translate.preserve_whitespace {
            self.translate.preserve_whitespace = preserve;
        }
        if let Some(coalesce) = translate.coalesce {
            self.translate.coalesce = coalesce;
        }
        if let Some(level) = layer.log.level {
            self.log.level = level;
        }
        let mut paths = layer.search.paths;
        for path in self.search.paths {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        self.search.paths = paths;
        self
    }

    /// Prepend search roots taken from `CHEADER_PATH`
    pub fn apply_env(mut self) -> Config {
        if let Some(value) = std::env::var_os(SEARCH_PATH_ENV) {
            let mut paths: Vec<PathBuf> = std::env::split_paths(&value)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            for path in self.search.paths {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
            self.search.paths = paths;
        }
        self
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("cheader"));
    }

    // Fallback to ~/.config/cheader
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("cheader"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("cheader"));
    }

    None
}

/// Get the user config file path (~/.config/cheader/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Read one config layer; a missing file yields an empty layer
pub fn load_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    if !path.exists() {
        return Ok(ConfigLayer::default());
    }

    let content = fs::read_to_string(path).map_err(ConfigError::IoError)?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

/// Read a config file over the defaults
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    Ok(Config::default().merge(load_layer(path)?))
}

fn user_layer() -> Result<ConfigLayer, ConfigError> {
    match get_config_path() {
        Some(path) => load_layer(&path),
        None => Ok(ConfigLayer::default()),
    }
}

/// Load user-level configuration
/// Returns default config if file doesn't exist
pub fn load_user_config() -> Result<Config, ConfigError> {
    Ok(Config::default().merge(user_layer()?))
}

/// Load project-level configuration from `dir/cheader.toml`
pub fn load_project_config(dir: &Path) -> Result<Config, ConfigError> {
    load_config_file(&dir.join(PROJECT_CONFIG_FILE))
}

/// Load the merged configuration: user, then project, then environment
pub fn load_config(project_dir: &Path) -> Result<Config, ConfigError> {
    let project = load_layer(&project_dir.join(PROJECT_CONFIG_FILE))?;
    Ok(Config::default()
        .merge(user_layer()?)
        .merge(project)
        .apply_env())
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
