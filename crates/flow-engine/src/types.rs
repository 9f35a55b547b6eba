//! Core types for flow graphs
//!
//! These types define the structure of a flow: nodes, edges, node data
//! payloads, and the exposed output value consumed by downstream nodes.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// The closed set of node kinds a flow can contain
///
/// Serialized as the snake_case strings used both in persisted snapshots
/// and as keys in the resolved upstream input map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Client selector (no upstream dependency)
    Client,
    /// Campaign selector, filtered by the connected client
    Campaign,
    /// Planning selector, filtered by the connected campaign
    Planning,
    /// Analysis selector, filtered by the connected client
    Analysis,
    /// Knowledge-source selector/creator, filtered by the connected client
    Knowledge,
    /// Image generation step; merges support outputs into a DesignConfig
    ImageGenerator,
    /// AI chat step
    Chat,
    /// Reference image supplier
    ReferenceImage,
    /// Brand logo supplier
    #[serde(rename = "image_logo")]
    Logo,
    /// Lighting color supplier
    Colors,
    /// Visual style supplier
    Styles,
    /// Subject description supplier
    Subject,
    /// Display sink for generated text
    GeneratedContent,
    /// Display sink for generated images
    GeneratedImage,
    /// Multi-slide generation step
    Carousel,
}

impl NodeKind {
    /// All kinds, in palette order
    pub const ALL: [NodeKind; 15] = [
        NodeKind::Client,
        NodeKind::Campaign,
        NodeKind::Planning,
        NodeKind::Analysis,
        NodeKind::Knowledge,
        NodeKind::ImageGenerator,
        NodeKind::Chat,
        NodeKind::ReferenceImage,
        NodeKind::Logo,
        NodeKind::Colors,
        NodeKind::Styles,
        NodeKind::Subject,
        NodeKind::GeneratedContent,
        NodeKind::GeneratedImage,
        NodeKind::Carousel,
    ];

    /// The stable string key this kind contributes to a resolved input map
    ///
    /// Matches the serde representation so resolved keys and persisted
    /// snapshots agree.
    pub fn as_key(&self) -> &'static str {
        match self {
            NodeKind::Client => "client",
            NodeKind::Campaign => "campaign",
            NodeKind::Planning => "planning",
            NodeKind::Analysis => "analysis",
            NodeKind::Knowledge => "knowledge",
            NodeKind::ImageGenerator => "image_generator",
            NodeKind::Chat => "chat",
            NodeKind::ReferenceImage => "reference_image",
            NodeKind::Logo => "image_logo",
            NodeKind::Colors => "colors",
            NodeKind::Styles => "styles",
            NodeKind::Subject => "subject",
            NodeKind::GeneratedContent => "generated_content",
            NodeKind::GeneratedImage => "generated_image",
            NodeKind::Carousel => "carousel",
        }
    }
}

/// Position of a node on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The value a node exposes for downstream consumption
///
/// `id` identifies the record or node the value came from; `data` is the
/// payload consumers read. A node with nothing to contribute exposes no
/// output at all (`Option::None`), never an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeOutput {
    pub id: String,
    pub data: serde_json::Value,
}

impl NodeOutput {
    pub fn new(id: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// Per-node data payload
///
/// Always carries the `output` slot plus a flat map of kind-specific
/// editable fields. Mutated only through [`NodeData::merge`] — a shallow
/// merge where later keys win and explicit `null` removes a key, so
/// fields can be cleared through the same entry point that sets them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// The value exposed to downstream consumers; `None` contributes nothing
    pub output: Option<NodeOutput>,
    /// Kind-specific editable fields
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl NodeData {
    /// Create node data from an initial field map, with no output
    pub fn with_fields(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            output: None,
            fields,
        }
    }

    /// Shallow-merge a partial update into the data
    ///
    /// An `"output"` key in the patch updates the output slot (must be a
    /// valid output shape or `null`); any other key replaces the field of
    /// the same name, with `null` removing it.
    pub fn merge(&mut self, patch: serde_json::Map<String, serde_json::Value>) {
        for (key, value) in patch {
            if key == "output" {
                self.output = serde_json::from_value(value).unwrap_or(None);
                continue;
            }
            if value.is_null() {
                self.fields.remove(&key);
            } else {
                self.fields.insert(key, value);
            }
        }
    }

    /// Read a string field, treating missing and non-string values as empty
    pub fn str_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Read a boolean field, defaulting to `false`
    pub fn bool_field(&self, key: &str) -> bool {
        self.fields
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    /// Read an unsigned integer field
    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.fields.get(key).and_then(|v| v.as_u64())
    }

    /// Deserialize the field map into a typed field model
    pub fn parse_fields<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(self.fields.clone()))
    }
}

/// A node instance in a flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Unique identifier for this node instance
    pub id: NodeId,
    /// Node kind
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Position on the canvas
    pub position: Position,
    /// Editable fields plus the exposed output
    pub data: NodeData,
}

/// A directed connection between two nodes
///
/// Edges are pure topology: they carry no data of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Source handle, when the source exposes more than one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    /// Target handle, when the target accepts more than one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

/// A complete flow: nodes, edges, and ownership
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    /// Unique identifier for this flow
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Owning user id
    pub owner: String,
    /// Nodes in the flow
    pub nodes: Vec<FlowNode>,
    /// Edges connecting nodes
    pub edges: Vec<FlowEdge>,
}

impl Flow {
    /// Create a new empty flow
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: owner.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find a node by ID (mutable)
    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Edges coming into a node, in edge-list order
    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a FlowEdge> {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Edges going out of a node, in edge-list order
    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a FlowEdge> {
        self.edges.iter().filter(move |e| e.source == node_id)
    }
}
