//! Event types for observing flow mutations
//!
//! Events are sent from the store to any consumer (a UI bridge, a test
//! harness) to report graph changes and user-facing notifications.

use serde::{Deserialize, Serialize};

use crate::types::{EdgeId, NodeId, NodeKind};

/// Trait for receiving flow events
///
/// Abstracts over the transport so the store can be used headless, behind
/// an IPC bridge, or in tests.
pub trait EventSink: Send + Sync {
    fn send(&self, event: FlowEvent);
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Events emitted by the flow store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FlowEvent {
    /// A node was added to the flow
    #[serde(rename_all = "camelCase")]
    NodeAdded { node_id: NodeId, kind: NodeKind },

    /// A node's data changed through the update entry point
    #[serde(rename_all = "camelCase")]
    NodeDataUpdated { node_id: NodeId },

    /// A node and its incident edges were removed
    #[serde(rename_all = "camelCase")]
    NodeRemoved { node_id: NodeId },

    /// An edge was added
    #[serde(rename_all = "camelCase")]
    EdgeAdded {
        edge_id: EdgeId,
        source: NodeId,
        target: NodeId,
    },

    /// An edge was removed
    #[serde(rename_all = "camelCase")]
    EdgeRemoved { edge_id: EdgeId },

    /// A flow snapshot was loaded; dangling edges are counted, not kept
    #[serde(rename_all = "camelCase")]
    FlowLoaded {
        flow_id: String,
        dropped_edges: usize,
    },

    /// A transient user-facing notification (remote call failures, etc.)
    #[serde(rename_all = "camelCase")]
    Notification {
        level: NotificationLevel,
        message: String,
    },
}

impl FlowEvent {
    /// Create an error notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::Notification {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: FlowEvent) {}
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: std::sync::Mutex<Vec<FlowEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<FlowEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: FlowEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_events() {
        let sink = VecEventSink::new();
        sink.send(FlowEvent::NodeDataUpdated {
            node_id: "n1".into(),
        });
        sink.send(FlowEvent::error("upload failed"));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        match &events[1] {
            FlowEvent::Notification { level, message } => {
                assert_eq!(*level, NotificationLevel::Error);
                assert_eq!(message, "upload failed");
            }
            other => panic!("Expected Notification, got {:?}", other),
        }
    }

    #[test]
    fn null_sink_discards() {
        NullEventSink.send(FlowEvent::NodeRemoved {
            node_id: "n1".into(),
        });
    }
}
