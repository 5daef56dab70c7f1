//! Error types for locale and catalog operations

use thiserror::Error;

/// Errors raised while parsing locales or loading message catalogs.
///
/// Formatting itself never fails; these only surface from explicit
/// parsing and loading calls.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Tag is not a usable BCP 47 language tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Catalog file had an unexpected shape
    #[error("Failed to parse message file: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Plural category name outside zero/one/two/few/many/other
    #[error("Invalid plural category: {0}")]
    InvalidPluralCategory(String),
}
