//! Error types for adfl-client

use thiserror::Error;

/// Metadata fetch errors
///
/// Every variant means the upstream could not answer; an empty listing is
/// `Ok(vec![])`, never an error.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Upstream service unavailable (C001)
    #[error("[C001] Failed to list {resource}: {message}")]
    Unavailable { resource: String, message: String },

    /// Export file could not be read (C002)
    #[error("[C002] Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Export file is not valid provider JSON (C003)
    #[error("[C003] Failed to parse '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Result type alias for ClientError
pub type ClientResult<T> = Result<T, ClientError>;
