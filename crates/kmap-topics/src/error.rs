//! Topic error types.

use thiserror::Error;

/// Errors that can occur while preparing the topic graph.
#[derive(Debug, Error)]
pub enum TopicsError {
    /// Registry failed validation
    #[error("Registry error: {0}")]
    Registry(#[from] kmap_types::MapError),

    /// Alias could not be compiled into a matcher
    #[error("Invalid alias '{alias}' for topic '{topic}': {source}")]
    Pattern {
        topic: String,
        alias: String,
        #[source]
        source: regex::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
