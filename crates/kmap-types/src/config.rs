//! Configuration loading for kmap.
//!
//! Layered config: defaults -> user config file -> CLI config file -> env vars.
//! CLI flags are applied by the caller after loading.
//! The user config file lives at ~/.config/kmap/config.toml.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::{BaseDirs, ProjectDirs};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Workspace root that holds the memory directory and notes file
    #[serde(default = "default_root")]
    pub root: String,

    /// Directory of daily logs named YYYY-MM-DD.md, relative to root
    #[serde(default = "default_memory_dir")]
    pub memory_dir: String,

    /// Undated long-lived notes file, relative to root
    #[serde(default = "default_notes_file")]
    pub notes_file: Option<String>,

    /// Entity registry TOML file; the built-in registry is used when unset
    #[serde(default)]
    pub registry_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_memory_dir() -> String {
    "memory".to_string()
}

fn default_notes_file() -> Option<String> {
    Some("MEMORY.md".to_string())
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: default_root(),
            memory_dir: default_memory_dir(),
            notes_file: default_notes_file(),
            registry_path: None,
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/kmap/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (KMAP_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, MapError> {
        layered(cli_config_path)?
            .try_deserialize()
            .map_err(|e| MapError::Config(e.to_string()))
    }

    /// Load one nested table (e.g. `topics`) from the same layered sources.
    ///
    /// A missing table yields `T::default()`.
    pub fn load_section<T>(cli_config_path: Option<&str>, key: &str) -> Result<T, MapError>
    where
        T: DeserializeOwned + Default,
    {
        match layered(cli_config_path)?.get::<T>(key) {
            Ok(value) => Ok(value),
            Err(ConfigError::NotFound(_)) => Ok(T::default()),
            Err(e) => Err(MapError::Config(e.to_string())),
        }
    }

    /// Root directory with `~/` expanded.
    pub fn expanded_root(&self) -> PathBuf {
        expand_home(&self.root)
    }

    /// Directory holding the daily logs.
    pub fn memory_path(&self) -> PathBuf {
        self.expanded_root().join(&self.memory_dir)
    }

    /// Path of the undated notes file, if configured.
    pub fn notes_path(&self) -> Option<PathBuf> {
        self.notes_file
            .as_ref()
            .filter(|f| !f.trim().is_empty())
            .map(|f| self.expanded_root().join(f))
    }

    /// Registry file path with `~/` expanded, if configured.
    pub fn registry_file(&self) -> Option<PathBuf> {
        self.registry_path.as_deref().map(expand_home)
    }
}

fn layered(cli_config_path: Option<&str>) -> Result<Config, MapError> {
    let config_dir = ProjectDirs::from("", "", "kmap")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let default_config_path = config_dir.join("config");

    let mut builder = Config::builder()
        .set_default("root", default_root())
        .map_err(|e| MapError::Config(e.to_string()))?
        .set_default("memory_dir", default_memory_dir())
        .map_err(|e| MapError::Config(e.to_string()))?
        .set_default("log_level", default_log_level())
        .map_err(|e| MapError::Config(e.to_string()))?
        .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

    if let Some(path) = cli_config_path {
        builder = builder.add_source(File::with_name(path).required(true));
    }

    // KMAP_MEMORY_DIR -> memory_dir, KMAP_TOPICS__CONNECTIONS__LIMIT -> topics.connections.limit
    builder = builder.add_source(
        Environment::with_prefix("KMAP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|e| MapError::Config(e.to_string()))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
