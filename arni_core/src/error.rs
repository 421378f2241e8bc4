//! Error types for the arni_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for arni_core operations
///
/// Dose evaluation itself never fails; these errors come from the input
/// boundary, configuration, and the reference store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Patient input outside its declared domain
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Reference table lookup failed
    #[error("Unknown reference table: {0}")]
    UnknownTable(String),
}
