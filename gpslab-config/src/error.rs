//! Configuration error types

use thiserror::Error;

/// Errors raised while loading, reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration key not found: {0}")]
    KeyNotFound(String),

    /// File could not be read or has an unsupported format
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A value was present but out of range or otherwise unusable
    #[error("Invalid setting {key}: {message}")]
    ValidationError { key: String, message: String },

    /// Stored value has the wrong shape for the requested type
    #[error("Type mismatch for {key}: {source}")]
    TypeMismatch {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Message catalog error: {0}")]
    Catalog(#[from] gpslab_i18n::I18nError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvError(#[from] std::env::VarError),
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
