//! Error types for remote collaborators

use thiserror::Error;

/// Result type alias using RemoteError
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Errors from the remote data store, file storage, or generation service
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Required configuration is missing
    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}
