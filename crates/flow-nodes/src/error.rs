//! Error types for node actions
//!
//! Only programming errors surface as `Err` here (unknown node, wrong
//! kind for an action, missing required upstream). Remote-call failures
//! are part of normal operation: they become a user-facing notification
//! event and the attempted state change is simply not applied.

use thiserror::Error;

use flow_engine::FlowEngineError;

/// Result type alias using NodeActionError
pub type Result<T> = std::result::Result<T, NodeActionError>;

/// Errors from node actions on the editor facade
#[derive(Debug, Error)]
pub enum NodeActionError {
    /// Underlying store error
    #[error(transparent)]
    Engine(#[from] FlowEngineError),

    /// The action was invoked on a node of the wrong kind
    #[error("Node '{node_id}' does not support this action (expected {expected})")]
    WrongKind {
        node_id: String,
        expected: &'static str,
    },

    /// The action needs an upstream record that is not connected
    #[error("Node '{node_id}' requires a connected {missing} input")]
    MissingUpstream {
        node_id: String,
        missing: &'static str,
    },

    /// Field payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
