//! Configuration types for the ezconf command-line tool.
//!
//! [`Config::load`] reads `~/.config/ezconf/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[input]
default_format = "auto"

[index]
max_results = 20
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level tool configuration, loaded from `~/.config/ezconf/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub index: IndexConfig,
}

/// `[input]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Format assumed for documents whose extension says nothing.
    #[serde(default)]
    pub default_format: DocumentFormat,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            default_format: DocumentFormat::Auto,
        }
    }
}

/// `[index]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_max_results() -> usize { 20 }

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

/// Configuration document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Decide from the file extension, falling back to YAML (a JSON document
    /// is also valid YAML, but loses nothing when read as JSON).
    #[default]
    Auto,
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Resolve [`DocumentFormat::Auto`] against a file path.
    pub fn resolve(self, path: &Path) -> DocumentFormat {
        match self {
            DocumentFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
                _ => DocumentFormat::Yaml,
            },
            explicit => explicit,
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Auto => write!(f, "auto"),
            DocumentFormat::Yaml => write!(f, "yaml"),
            DocumentFormat::Json => write!(f, "json"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/ezconf/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("ezconf")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
