//! Error types for the knowledge map.

use thiserror::Error;

/// Unified error type for loading registries and settings.
#[derive(Debug, Error)]
pub enum MapError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registry contents failed validation
    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),

    /// Registry file could not be parsed
    #[error("Registry parse error: {0}")]
    RegistryParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
