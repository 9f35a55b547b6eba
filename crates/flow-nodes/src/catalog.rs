//! Node kind catalog
//!
//! Exhaustive metadata for every node kind: palette label, category,
//! upstream requirement, and the default editable fields a freshly added
//! node starts with. Dispatch is a `match` over the closed `NodeKind`
//! enum, so adding a kind without covering it here is a compile error.

use flow_engine::{NodeKind, UpstreamInputMap};
use serde::Serialize;

use crate::chat::ChatFields;
use crate::generator::{CarouselFields, GeneratorFields};
use crate::selector::SelectorFields;
use crate::support::{
    ColorsFields, LogoFields, ReferenceImageFields, StylesFields, SubjectFields,
};

/// Category of a node, for palette grouping and behavior family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Picks a record from the remote store, possibly filtered by upstream
    Selector,
    /// Supplies auxiliary generation parameters from local fields
    Support,
    /// Produces content (design generation, chat)
    Generator,
    /// Renders an upstream value; never produces output
    Display,
}

/// Static metadata for one node kind
#[derive(Debug, Clone, Copy)]
pub struct NodeMetadata {
    pub kind: NodeKind,
    pub label: &'static str,
    pub category: NodeCategory,
    /// Upstream kind this node cannot operate without
    pub required_upstream: Option<NodeKind>,
}

/// Metadata for a node kind
pub fn metadata(kind: NodeKind) -> NodeMetadata {
    match kind {
        NodeKind::Client => NodeMetadata {
            kind,
            label: "Cliente",
            category: NodeCategory::Selector,
            required_upstream: None,
        },
        NodeKind::Campaign => NodeMetadata {
            kind,
            label: "Campanha",
            category: NodeCategory::Selector,
            required_upstream: Some(NodeKind::Client),
        },
        NodeKind::Planning => NodeMetadata {
            kind,
            label: "Planejamento",
            category: NodeCategory::Selector,
            required_upstream: Some(NodeKind::Campaign),
        },
        NodeKind::Analysis => NodeMetadata {
            kind,
            label: "Análise",
            category: NodeCategory::Selector,
            required_upstream: Some(NodeKind::Client),
        },
        NodeKind::Knowledge => NodeMetadata {
            kind,
            label: "Base de conhecimento",
            category: NodeCategory::Selector,
            required_upstream: Some(NodeKind::Client),
        },
        NodeKind::ImageGenerator => NodeMetadata {
            kind,
            label: "Gerador de imagem",
            category: NodeCategory::Generator,
            required_upstream: None,
        },
        NodeKind::Chat => NodeMetadata {
            kind,
            label: "Chat",
            category: NodeCategory::Generator,
            required_upstream: None,
        },
        NodeKind::ReferenceImage => NodeMetadata {
            kind,
            label: "Imagem de referência",
            category: NodeCategory::Support,
            required_upstream: None,
        },
        NodeKind::Logo => NodeMetadata {
            kind,
            label: "Logo",
            category: NodeCategory::Support,
            required_upstream: None,
        },
        NodeKind::Colors => NodeMetadata {
            kind,
            label: "Cores",
            category: NodeCategory::Support,
            required_upstream: None,
        },
        NodeKind::Styles => NodeMetadata {
            kind,
            label: "Estilos",
            category: NodeCategory::Support,
            required_upstream: None,
        },
        NodeKind::Subject => NodeMetadata {
            kind,
            label: "Assunto",
            category: NodeCategory::Support,
            required_upstream: None,
        },
        NodeKind::GeneratedContent => NodeMetadata {
            kind,
            label: "Conteúdo gerado",
            category: NodeCategory::Display,
            required_upstream: None,
        },
        NodeKind::GeneratedImage => NodeMetadata {
            kind,
            label: "Imagem gerada",
            category: NodeCategory::Display,
            required_upstream: None,
        },
        NodeKind::Carousel => NodeMetadata {
            kind,
            label: "Carrossel",
            category: NodeCategory::Generator,
            required_upstream: None,
        },
    }
}

fn to_fields<T: Serialize>(model: &T) -> serde_json::Map<String, serde_json::Value> {
    match serde_json::to_value(model) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    }
}

/// Default editable fields for a freshly added node of this kind
pub fn default_fields(kind: NodeKind) -> serde_json::Map<String, serde_json::Value> {
    match kind {
        NodeKind::Client
        | NodeKind::Campaign
        | NodeKind::Planning
        | NodeKind::Analysis
        | NodeKind::Knowledge => to_fields(&SelectorFields::default()),
        NodeKind::ImageGenerator => to_fields(&GeneratorFields::default()),
        NodeKind::Carousel => to_fields(&CarouselFields::default()),
        NodeKind::Chat => to_fields(&ChatFields::default()),
        NodeKind::ReferenceImage => to_fields(&ReferenceImageFields::default()),
        NodeKind::Logo => to_fields(&LogoFields::default()),
        NodeKind::Colors => to_fields(&ColorsFields::default()),
        NodeKind::Styles => to_fields(&StylesFields::default()),
        NodeKind::Subject => to_fields(&SubjectFields::default()),
        NodeKind::GeneratedContent | NodeKind::GeneratedImage => serde_json::Map::new(),
    }
}

/// Whether a node's interaction is disabled given its resolved inputs
///
/// A node requiring an upstream kind is disabled while that kind is
/// absent from the resolved map (disconnected, or connected but exposing
/// no output yet).
pub fn is_disabled(kind: NodeKind, upstream: &UpstreamInputMap) -> bool {
    match metadata(kind).required_upstream {
        Some(required) => !upstream.contains_key(required.as_key()),
        None => false,
    }
}

/// Remote resource a selector kind reads from
pub fn selector_resource(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Client => Some("clients"),
        NodeKind::Campaign => Some("campaigns"),
        NodeKind::Planning => Some("plannings"),
        NodeKind::Analysis => Some("analyses"),
        NodeKind::Knowledge => Some("knowledge_sources"),
        _ => None,
    }
}

/// Column a selector kind filters by, using the upstream record's id
pub fn selector_filter_column(kind: NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Campaign => Some("client_id"),
        NodeKind::Planning => Some("campaign_id"),
        NodeKind::Analysis => Some("client_id"),
        NodeKind::Knowledge => Some("client_id"),
        _ => None,
    }
}
