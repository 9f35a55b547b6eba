//! Flow validation
//!
//! Structural checks over nodes and edges. Used by the snapshot loader to
//! drop dangling edges and by hosts that want to surface graph problems
//! without mutating anything.

use std::collections::HashSet;

use crate::types::Flow;

/// Validation error with location context
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// An edge references a node that is not in the flow
    DanglingEdge { edge_id: String, node_id: String },
    /// An edge has an empty source or target
    EmptyEndpoint { edge_id: String },
    /// Two edges share source, target, and handles
    DuplicateEdge { edge_id: String },
    /// Two nodes share an id
    DuplicateNodeId { node_id: String },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingEdge { edge_id, node_id } => {
                write!(f, "Edge '{}' references unknown node '{}'", edge_id, node_id)
            }
            Self::EmptyEndpoint { edge_id } => {
                write!(f, "Edge '{}' has an empty endpoint", edge_id)
            }
            Self::DuplicateEdge { edge_id } => {
                write!(f, "Edge '{}' duplicates an earlier connection", edge_id)
            }
            Self::DuplicateNodeId { node_id } => {
                write!(f, "Node id '{}' is used more than once", node_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a flow, returning all problems found (not just the first)
pub fn validate_flow(flow: &Flow) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut node_ids: HashSet<&str> = HashSet::new();
    for node in &flow.nodes {
        if !node_ids.insert(node.id.as_str()) {
            errors.push(ValidationError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
    }

    let mut seen_connections = HashSet::new();
    for edge in &flow.edges {
        if edge.source.is_empty() || edge.target.is_empty() {
            errors.push(ValidationError::EmptyEndpoint {
                edge_id: edge.id.clone(),
            });
            continue;
        }
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.as_str()) {
                errors.push(ValidationError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
        let key = (
            edge.source.clone(),
            edge.target.clone(),
            edge.source_handle.clone(),
            edge.target_handle.clone(),
        );
        if !seen_connections.insert(key) {
            errors.push(ValidationError::DuplicateEdge {
                edge_id: edge.id.clone(),
            });
        }
    }

    errors
}

/// Check whether an edge's endpoints both resolve to nodes in the flow
pub fn edge_is_dangling(flow: &Flow, source: &str, target: &str) -> bool {
    flow.find_node(source).is_none() || flow.find_node(target).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FlowEdge, FlowNode, NodeData, NodeKind, Position};

    fn flow_with(nodes: &[&str], edges: &[(&str, &str, &str)]) -> Flow {
        let mut flow = Flow::new("f", "t", "u");
        for id in nodes {
            flow.nodes.push(FlowNode {
                id: id.to_string(),
                kind: NodeKind::Subject,
                position: Position::default(),
                data: NodeData::default(),
            });
        }
        for (id, source, target) in edges {
            flow.edges.push(FlowEdge {
                id: id.to_string(),
                source: source.to_string(),
                target: target.to_string(),
                source_handle: None,
                target_handle: None,
            });
        }
        flow
    }

    #[test]
    fn valid_flow_has_no_errors() {
        let flow = flow_with(&["a", "b"], &[("e1", "a", "b")]);
        assert!(validate_flow(&flow).is_empty());
    }

    #[test]
    fn dangling_edge_is_reported() {
        let flow = flow_with(&["a"], &[("e1", "a", "ghost")]);
        let errors = validate_flow(&flow);
        assert_eq!(
            errors,
            vec![ValidationError::DanglingEdge {
                edge_id: "e1".into(),
                node_id: "ghost".into()
            }]
        );
    }

    #[test]
    fn duplicate_edges_are_reported() {
        let flow = flow_with(&["a", "b"], &[("e1", "a", "b"), ("e2", "a", "b")]);
        let errors = validate_flow(&flow);
        assert!(errors.contains(&ValidationError::DuplicateEdge {
            edge_id: "e2".into()
        }));
    }

    #[test]
    fn collects_multiple_errors() {
        let flow = flow_with(&["a"], &[("e1", "a", "ghost"), ("e2", "", "a")]);
        assert_eq!(validate_flow(&flow).len(), 2);
    }
}
