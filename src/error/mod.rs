//! Error handling module for gifcut

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for gifcut operations outside the converter itself
#[derive(Error, Debug)]
pub enum GifcutError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Logging subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    LoggingError { message: String },

    /// Converter did not reach the expected state in time
    #[error("Timed out waiting for {what}")]
    Timeout { what: String },

    /// Converter rejected an operation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// TOML parse error
    #[error("Invalid TOML: {0}")]
    TomlError(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for gifcut operations
pub type GifcutResult<T> = std::result::Result<T, GifcutError>;
