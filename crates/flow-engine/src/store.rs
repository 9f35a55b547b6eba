//! Flow state store
//!
//! Holds the single mutable graph state object. All node data changes go
//! through [`FlowStore::update_node_data`]; there is no other mutation
//! path, which gives last-writer-wins semantics per node id without any
//! locking. Mutations happen on the interface thread's event loop; async
//! completions apply their results through the same entry point.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FlowEngineError, Result};
use crate::events::{EventSink, FlowEvent, NullEventSink};
use crate::types::{EdgeId, Flow, FlowEdge, FlowNode, NodeData, NodeId, NodeKind, NodeOutput, Position};
use crate::undo::UndoStack;

/// A connection request, as produced by the canvas layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }
}

/// The graph state store
pub struct FlowStore {
    flow: Flow,
    undo: UndoStack,
    events: Arc<dyn EventSink>,
}

impl FlowStore {
    /// Create a store around an existing flow
    pub fn new(flow: Flow, events: Arc<dyn EventSink>) -> Self {
        let mut undo = UndoStack::default();
        // Seed the history so the first mutation can be undone back to
        // the loaded state.
        if let Err(e) = undo.push(&flow) {
            log::warn!("Could not seed undo history: {}", e);
        }
        Self { flow, undo, events }
    }

    /// Create a store with no event consumer
    pub fn headless(flow: Flow) -> Self {
        Self::new(flow, Arc::new(NullEventSink))
    }

    /// The current flow state
    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    /// Rename the flow
    pub fn rename(&mut self, name: impl Into<String>) {
        self.flow.name = name.into();
        self.record_history();
    }

    /// Add a node of the given kind with initial fields and no output
    ///
    /// Returns the generated node id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        position: Position,
        fields: serde_json::Map<String, serde_json::Value>,
    ) -> NodeId {
        let id = uuid::Uuid::new_v4().to_string();
        self.flow.nodes.push(FlowNode {
            id: id.clone(),
            kind,
            position,
            data: NodeData::with_fields(fields),
        });
        log::debug!("Added {:?} node {}", kind, id);
        self.events.send(FlowEvent::NodeAdded {
            node_id: id.clone(),
            kind,
        });
        self.record_history();
        id
    }

    /// Merge a partial data patch into a node's data
    ///
    /// This is the only way node data changes. The patch is shallow-merged
    /// (later keys win, `null` removes a key); an `"output"` key updates
    /// the output slot.
    pub fn update_node_data(
        &mut self,
        node_id: &str,
        patch: serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        let node = self
            .flow
            .find_node_mut(node_id)
            .ok_or_else(|| FlowEngineError::NodeNotFound(node_id.to_string()))?;
        node.data.merge(patch);
        self.events.send(FlowEvent::NodeDataUpdated {
            node_id: node_id.to_string(),
        });
        self.record_history();
        Ok(())
    }

    /// Replace a node's exposed output
    ///
    /// Routed through the same merge entry point as field edits.
    pub fn set_output(&mut self, node_id: &str, output: Option<NodeOutput>) -> Result<()> {
        let mut patch = serde_json::Map::new();
        patch.insert("output".to_string(), serde_json::to_value(output)?);
        self.update_node_data(node_id, patch)
    }

    /// Move a node on the canvas
    pub fn move_node(&mut self, node_id: &str, position: Position) -> Result<()> {
        let node = self
            .flow
            .find_node_mut(node_id)
            .ok_or_else(|| FlowEngineError::NodeNotFound(node_id.to_string()))?;
        node.position = position;
        Ok(())
    }

    /// Append an edge after validating the connection
    ///
    /// A connection with an empty endpoint or an endpoint that is not in
    /// the flow is rejected without mutating state. A duplicate of an
    /// existing edge (same source, target, and handles) is silently
    /// ignored; the existing edge id is returned.
    pub fn connect(&mut self, connection: Connection) -> Result<EdgeId> {
        if connection.source.is_empty() || connection.target.is_empty() {
            return Err(FlowEngineError::MalformedConnection(
                "source and target are required".to_string(),
            ));
        }
        for endpoint in [&connection.source, &connection.target] {
            if self.flow.find_node(endpoint).is_none() {
                return Err(FlowEngineError::UnknownEndpoint(endpoint.clone()));
            }
        }

        if let Some(existing) = self.flow.edges.iter().find(|e| {
            e.source == connection.source
                && e.target == connection.target
                && e.source_handle == connection.source_handle
                && e.target_handle == connection.target_handle
        }) {
            log::debug!(
                "Ignoring duplicate edge {} -> {}",
                connection.source,
                connection.target
            );
            return Ok(existing.id.clone());
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.flow.edges.push(FlowEdge {
            id: id.clone(),
            source: connection.source.clone(),
            target: connection.target.clone(),
            source_handle: connection.source_handle,
            target_handle: connection.target_handle,
        });
        self.events.send(FlowEvent::EdgeAdded {
            edge_id: id.clone(),
            source: connection.source,
            target: connection.target,
        });
        self.record_history();
        Ok(id)
    }

    /// Remove an edge by id
    ///
    /// Downstream nodes are not touched: their resolved inputs simply no
    /// longer include the source on the next recomputation.
    pub fn remove_edge(&mut self, edge_id: &str) -> Result<()> {
        let index = self
            .flow
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| FlowEngineError::EdgeNotFound(edge_id.to_string()))?;
        self.flow.edges.remove(index);
        self.events.send(FlowEvent::EdgeRemoved {
            edge_id: edge_id.to_string(),
        });
        self.record_history();
        Ok(())
    }

    /// Remove a node and all edges touching it
    ///
    /// Incident edges are removed eagerly so saved snapshots never contain
    /// edges the loader would drop as dangling.
    pub fn remove_node(&mut self, node_id: &str) -> Result<()> {
        let index = self
            .flow
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| FlowEngineError::NodeNotFound(node_id.to_string()))?;
        self.flow.nodes.remove(index);
        let before = self.flow.edges.len();
        self.flow
            .edges
            .retain(|e| e.source != node_id && e.target != node_id);
        log::debug!(
            "Removed node {} and {} incident edge(s)",
            node_id,
            before - self.flow.edges.len()
        );
        self.events.send(FlowEvent::NodeRemoved {
            node_id: node_id.to_string(),
        });
        self.record_history();
        Ok(())
    }

    /// Undo the last mutation, restoring the previous graph state
    pub fn undo(&mut self) -> bool {
        match self.undo.undo() {
            Some(Ok(flow)) => {
                self.flow = flow;
                true
            }
            Some(Err(e)) => {
                log::warn!("Undo failed: {}", e);
                false
            }
            None => false,
        }
    }

    /// Redo a previously undone mutation
    pub fn redo(&mut self) -> bool {
        match self.undo.redo() {
            Some(Ok(flow)) => {
                self.flow = flow;
                true
            }
            Some(Err(e)) => {
                log::warn!("Redo failed: {}", e);
                false
            }
            None => false,
        }
    }

    fn record_history(&mut self) {
        if let Err(e) = self.undo.push(&self.flow) {
            log::warn!("Could not record undo snapshot: {}", e);
        }
    }
}
