//! Flow snapshot persistence format
//!
//! A flow is persisted as a single serialized snapshot of its nodes and
//! edges. Loading deserializes the snapshot verbatim, then drops any edge
//! whose source or target no longer resolves to a node (dangling edges
//! must not survive a load). Live callbacks are never part of the
//! snapshot; hosts re-attach them after loading.

use crate::error::Result;
use crate::types::Flow;
use crate::validation::edge_is_dangling;

/// Serialize a flow to its snapshot JSON
pub fn save_flow(flow: &Flow) -> Result<String> {
    Ok(serde_json::to_string(flow)?)
}

/// Deserialize a flow snapshot, dropping dangling edges
///
/// Returns the sanitized flow and the number of edges dropped.
pub fn load_flow(json: &str) -> Result<(Flow, usize)> {
    let mut flow: Flow = serde_json::from_str(json)?;
    let before = flow.edges.len();

    let snapshot = flow.clone();
    flow.edges.retain(|e| {
        let dangling = edge_is_dangling(&snapshot, &e.source, &e.target);
        if dangling {
            log::warn!(
                "Dropping dangling edge {} ({} -> {}) on load",
                e.id,
                e.source,
                e.target
            );
        }
        !dangling
    });

    let dropped = before - flow.edges.len();
    Ok((flow, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlowEdge, FlowNode, NodeData, NodeKind, NodeOutput, Position};

    fn sample_flow() -> Flow {
        let mut flow = Flow::new("f1", "Lançamento", "u1");
        flow.nodes.push(FlowNode {
            id: "client".into(),
            kind: NodeKind::Client,
            position: Position::new(0.0, 0.0),
            data: NodeData {
                output: Some(NodeOutput::new("c1", serde_json::json!({"name": "Acme"}))),
                fields: serde_json::json!({"selected_id": "c1"})
                    .as_object()
                    .unwrap()
                    .clone(),
            },
        });
        flow.nodes.push(FlowNode {
            id: "campaign".into(),
            kind: NodeKind::Campaign,
            position: Position::new(200.0, 0.0),
            data: NodeData::default(),
        });
        flow.edges.push(FlowEdge {
            id: "e1".into(),
            source: "client".into(),
            target: "campaign".into(),
            source_handle: None,
            target_handle: None,
        });
        flow
    }

    #[test]
    fn roundtrip_is_verbatim() {
        let flow = sample_flow();
        let json = save_flow(&flow).unwrap();
        let (restored, dropped) = load_flow(&json).unwrap();
        assert_eq!(dropped, 0);
        assert_eq!(restored, flow);
    }

    #[test]
    fn load_drops_dangling_edges() {
        let mut flow = sample_flow();
        flow.edges.push(FlowEdge {
            id: "e2".into(),
            source: "deleted".into(),
            target: "campaign".into(),
            source_handle: None,
            target_handle: None,
        });
        let json = save_flow(&flow).unwrap();

        let (restored, dropped) = load_flow(&json).unwrap();
        assert_eq!(dropped, 1);
        assert_eq!(restored.edges.len(), 1);
        assert_eq!(restored.edges[0].id, "e1");
        // Everything else is untouched.
        assert_eq!(restored.nodes, flow.nodes);
    }

    #[test]
    fn load_rejects_malformed_json() {
        assert!(load_flow("{not json").is_err());
    }
}
