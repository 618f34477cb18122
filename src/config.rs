//!
//! This module defines the driver configuration: which project directories are
//! walked, which file extensions are eligible, and how the external formatter is
//! invoked. The defaults reproduce the fixed behaviour of a plain run; a TOML file
//! can override them when passed explicitly on the command line.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Directories, relative to the working directory, that are searched for sources.
pub const DEFAULT_ROOTS: &[&str] = &["neutrino", "example", "test"];

/// C, C++ and Objective-C source and header extensions.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx", "m", "mm"];

/// Formatter binary looked up on `PATH`.
pub const DEFAULT_FORMATTER: &str = "clang-format";

/// Use the nearest `.clang-format` file and rewrite in place.
pub const DEFAULT_FORMATTER_ARGS: &[&str] = &["-style=file", "-i"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read config file at {path}")]
    IoError { source: std::io::Error, path: String },

    /// Failed to parse the config content
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError { path: String, message: String },

    /// Parsed config is not usable
    #[error("Invalid config in {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Complete driver configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// Root directory names, joined onto the working directory
    pub roots: Vec<String>,

    /// Eligible extensions, without the leading dot
    pub extensions: Vec<String>,

    /// External formatter invocation
    pub formatter: FormatterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: DEFAULT_ROOTS.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            formatter: FormatterConfig::default(),
        }
    }
}

/// How the formatter is run: `<command> <args...> <file>`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FormatterConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_FORMATTER.to_string(),
            args: DEFAULT_FORMATTER_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load a config file. Keys that are absent keep their default value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: display.clone(),
        })?;
        let config = Self::parse(&content, &display)?;
        log::debug!("Loaded config from {display}: {config:?}");
        Ok(config)
    }

    /// Parse TOML config content; `origin` is used in error messages.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        if config.formatter.command.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: origin.to_string(),
                message: "formatter.command must not be empty".to_string(),
            });
        }

        Ok(config)
    }
}
