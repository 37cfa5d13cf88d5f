//! Error types shared across PathMinder crates.

use thiserror::Error;

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// Configuration file not found.
    #[error("Configuration file not found: {0}")]
    NotFound(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
