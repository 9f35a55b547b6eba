//! Node output contract
//!
//! Every node kind implements the same contract: given its own editable
//! fields and its resolved upstream inputs, compute the output value it
//! exposes downstream — or `None` for "contributes nothing". Dispatch is
//! an exhaustive `match` over `NodeKind`, so a new kind cannot ship
//! without an output rule.

use serde_json::json;

use flow_engine::{FlowNode, NodeKind, NodeOutput, UpstreamInputMap};

use crate::catalog::is_disabled;
use crate::chat::ChatFields;
use crate::generator::{CarouselFields, GeneratorFields};
use crate::selector::SelectorFields;
use crate::support::{
    ColorsFields, LogoFields, ReferenceImageFields, StylesFields, SubjectFields,
};

fn selector_output(node: &FlowNode, upstream: &UpstreamInputMap) -> Option<NodeOutput> {
    // A selector whose required upstream is gone must expose nothing,
    // even if a selection is still stored in its fields.
    if is_disabled(node.kind, upstream) {
        return None;
    }
    let fields: SelectorFields = node.data.parse_fields().ok()?;
    let id = fields.selected_id?;
    let record = fields.selected_record?;
    Some(NodeOutput::new(id, record))
}

/// Compute the output a node exposes, from its fields and resolved inputs
///
/// Pure: no fetching, no mutation. Hosts call this when a node renders
/// and write the result back through the store, which keeps propagation
/// pull-based.
pub fn compute_output(node: &FlowNode, upstream: &UpstreamInputMap) -> Option<NodeOutput> {
    match node.kind {
        NodeKind::Client
        | NodeKind::Campaign
        | NodeKind::Planning
        | NodeKind::Analysis
        | NodeKind::Knowledge => selector_output(node, upstream),

        NodeKind::Colors => {
            let fields: ColorsFields = node.data.parse_fields().ok()?;
            fields
                .output_data()
                .map(|data| NodeOutput::new(node.id.clone(), data))
        }
        NodeKind::Styles => {
            let fields: StylesFields = node.data.parse_fields().ok()?;
            fields
                .output_data()
                .map(|data| NodeOutput::new(node.id.clone(), data))
        }
        NodeKind::Subject => {
            let fields: SubjectFields = node.data.parse_fields().ok()?;
            fields
                .output_data()
                .map(|data| NodeOutput::new(node.id.clone(), data))
        }
        NodeKind::ReferenceImage => {
            let fields: ReferenceImageFields = node.data.parse_fields().ok()?;
            fields
                .output_data()
                .map(|data| NodeOutput::new(node.id.clone(), data))
        }
        NodeKind::Logo => {
            let fields: LogoFields = node.data.parse_fields().ok()?;
            fields
                .output_data()
                .map(|data| NodeOutput::new(node.id.clone(), data))
        }

        NodeKind::ImageGenerator => {
            let fields: GeneratorFields = node.data.parse_fields().ok()?;
            let config = fields.assemble_config(upstream);
            Some(NodeOutput::new(
                node.id.clone(),
                json!({ "config": config, "assets": fields.assets }),
            ))
        }
        NodeKind::Carousel => {
            let fields: CarouselFields = node.data.parse_fields().ok()?;
            if fields.slides.is_empty() {
                return None;
            }
            let configs = fields.slide_configs(upstream);
            Some(NodeOutput::new(
                node.id.clone(),
                json!({ "slides": configs, "assets": fields.base.assets }),
            ))
        }

        NodeKind::Chat => {
            let fields: ChatFields = node.data.parse_fields().ok()?;
            fields
                .output_data()
                .map(|data| NodeOutput::new(node.id.clone(), data))
        }

        // Display nodes are pure sinks.
        NodeKind::GeneratedContent | NodeKind::GeneratedImage => None,
    }
}

/// Whether interaction with this node is currently disabled
///
/// Convenience wrapper pairing the catalog rule with a node instance.
pub fn node_is_disabled(node: &FlowNode, upstream: &UpstreamInputMap) -> bool {
    is_disabled(node.kind, upstream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_engine::{NodeData, Position};

    fn node_with_fields(kind: NodeKind, fields: serde_json::Value) -> FlowNode {
        FlowNode {
            id: "n1".to_string(),
            kind,
            position: Position::default(),
            data: NodeData::with_fields(fields.as_object().unwrap().clone()),
        }
    }

    fn upstream_with_client() -> UpstreamInputMap {
        let mut map = UpstreamInputMap::new();
        map.insert(
            "client".to_string(),
            NodeOutput::new("c1", json!({"name": "Acme"})),
        );
        map
    }

    #[test]
    fn display_nodes_never_output() {
        let node = node_with_fields(NodeKind::GeneratedImage, json!({}));
        let mut upstream = UpstreamInputMap::new();
        upstream.insert(
            "image_generator".to_string(),
            NodeOutput::new("g1", json!({"config": {}})),
        );
        assert_eq!(compute_output(&node, &upstream), None);
    }

    #[test]
    fn support_output_appears_when_any_field_is_set() {
        let empty = node_with_fields(NodeKind::Colors, json!({}));
        assert_eq!(compute_output(&empty, &UpstreamInputMap::new()), None);

        let touched = node_with_fields(
            NodeKind::Colors,
            json!({"ambient_color": " #FFAA00 "}),
        );
        let output = compute_output(&touched, &UpstreamInputMap::new()).unwrap();
        assert_eq!(output.data, json!({"ambient_color": "#FFAA00"}));
    }

    #[test]
    fn clearing_support_fields_drives_output_to_none() {
        let node = node_with_fields(NodeKind::Subject, json!({"description": "  "}));
        assert_eq!(compute_output(&node, &UpstreamInputMap::new()), None);
    }

    #[test]
    fn selector_without_required_upstream_outputs_none() {
        let node = node_with_fields(
            NodeKind::Campaign,
            json!({"selected_id": "m1", "selected_record": {"id": "m1"}}),
        );
        // Selection is stored, but the client upstream is gone.
        assert_eq!(compute_output(&node, &UpstreamInputMap::new()), None);
        // Reconnecting the client makes the same stored selection visible.
        assert!(compute_output(&node, &upstream_with_client()).is_some());
    }

    #[test]
    fn selector_without_selection_outputs_none() {
        let node = node_with_fields(NodeKind::Campaign, json!({}));
        assert_eq!(compute_output(&node, &upstream_with_client()), None);
    }

    #[test]
    fn client_selector_needs_no_upstream() {
        let node = node_with_fields(
            NodeKind::Client,
            json!({"selected_id": "c1", "selected_record": {"id": "c1", "name": "Acme"}}),
        );
        let output = compute_output(&node, &UpstreamInputMap::new()).unwrap();
        assert_eq!(output.id, "c1");
    }

    #[test]
    fn generator_outputs_assembled_config() {
        let node = node_with_fields(NodeKind::ImageGenerator, json!({"dimensions": "9:16"}));
        let mut upstream = UpstreamInputMap::new();
        upstream.insert(
            "colors".to_string(),
            NodeOutput::new("colors-1", json!({"ambient_color": "#111111"})),
        );
        let output = compute_output(&node, &upstream).unwrap();
        assert_eq!(output.data["config"]["dimensions"], json!("9:16"));
        assert_eq!(output.data["config"]["ambient_color"], json!("#111111"));
    }

    #[test]
    fn carousel_without_slides_outputs_none() {
        let node = node_with_fields(NodeKind::Carousel, json!({"slides": []}));
        assert_eq!(compute_output(&node, &UpstreamInputMap::new()), None);

        let with_slide = node_with_fields(
            NodeKind::Carousel,
            json!({"slides": [{"disabled_support_types": [], "extra_instructions": ""}]}),
        );
        let output = compute_output(&with_slide, &UpstreamInputMap::new()).unwrap();
        assert_eq!(output.data["slides"].as_array().unwrap().len(), 1);
    }
}
