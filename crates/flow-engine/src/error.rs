//! Error types for the flow engine

use thiserror::Error;

/// Result type alias using FlowEngineError
pub type Result<T> = std::result::Result<T, FlowEngineError>;

/// Errors that can occur in the flow engine
#[derive(Debug, Error)]
pub enum FlowEngineError {
    /// A referenced node does not exist
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// A referenced edge does not exist
    #[error("Edge not found: {0}")]
    EdgeNotFound(String),

    /// A connection request is missing an endpoint
    #[error("Malformed connection: {0}")]
    MalformedConnection(String),

    /// A connection references a node that is not in the flow
    #[error("Connection references unknown node '{0}'")]
    UnknownEndpoint(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Undo snapshot compression error
    #[error("Compression error: {0}")]
    Compression(String),
}
