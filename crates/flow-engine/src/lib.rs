//! Flow Engine - graph state and data propagation core for Designflow
//!
//! This crate holds the state model of a content-generation flow: the node
//! and edge types, the single-entry-point state store, and the pull-based
//! upstream resolver that computes what each node can see from the nodes
//! connected as its inputs.
//!
//! # Architecture
//!
//! - `FlowStore`: the one mutable graph state object; all node data
//!   changes go through its merge-based update entry point
//! - `resolve_upstream`: derived inputs, recomputed on every demand and
//!   never cached, so a node's visible inputs always match the latest
//!   upstream outputs
//! - `UndoStack`: compressed whole-graph snapshots for undo/redo
//! - `EventSink`: generic event stream for hosts and tests
//!
//! Node behavior (what each kind does with its inputs) lives in the
//! `flow-nodes` crate; this crate is deliberately kind-agnostic beyond
//! the `NodeKind` tag itself.

pub mod error;
pub mod events;
pub mod resolver;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod undo;
pub mod validation;

// Re-export key types
pub use error::{FlowEngineError, Result};
pub use events::{EventSink, FlowEvent, NotificationLevel, NullEventSink, VecEventSink};
pub use resolver::{resolve_upstream, UpstreamInputMap};
pub use snapshot::{load_flow, save_flow};
pub use store::{Connection, FlowStore};
pub use types::{
    EdgeId, Flow, FlowEdge, FlowNode, NodeData, NodeId, NodeKind, NodeOutput, Position,
};
pub use undo::UndoStack;
pub use validation::{validate_flow, ValidationError};
