//! Error types for adfl-core

use adfl_client::ClientError;
use thiserror::Error;

/// Core error type for adf-lineage
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Configuration file could not be read
    #[error("[E004] Failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    /// L001: A bulk metadata listing failed; the run cannot continue
    #[error("[L001] Failed to extract {resource}: {source}")]
    Upstream {
        resource: &'static str,
        source: ClientError,
    },

    /// L002: An output document could not be written
    #[error("[L002] Failed to write '{path}': {source}")]
    Output {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
