//! Error types for translation loading and configuration

use thiserror::Error;

/// Errors that can occur while loading or configuring translations.
///
/// Lookup itself never surfaces these: a missing key renders a bracketed
/// diagnostic string instead of raising (see [`crate::I18n::translate`]).
#[derive(Debug, Error)]
pub enum I18nError {
    /// Invalid locale tag
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    /// Failed to parse a translation table
    #[error("Failed to parse translation table: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown IANA timezone name
    #[cfg(feature = "timezones")]
    #[error("Unknown timezone: {0}")]
    UnknownTimeZone(String),

    /// Invalid plural category
    #[error("Invalid plural category: {0}")]
    InvalidPluralCategory(String),
}
