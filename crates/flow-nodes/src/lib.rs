//! Flow Nodes - node kind implementations for Designflow
//!
//! Every node in a flow is one of a closed set of kinds, each with its
//! own editable fields and a shared output contract: fields + resolved
//! upstream inputs in, `Option<NodeOutput>` out. Dispatch is an
//! exhaustive `match` over `NodeKind`, so coverage is checked at compile
//! time.
//!
//! # Categories
//!
//! - **Selector**: picks a record from the remote store, filtered by the
//!   record selected upstream (campaigns by client, plannings by
//!   campaign, ...)
//! - **Support**: supplies generation parameters from local fields
//!   (colors, styles, subject, reference images, logo)
//! - **Generator**: assembles support outputs into a `DesignConfig`
//!   (image generator, carousel) or produces text (chat)
//! - **Display**: renders an upstream value; never produces output
//!
//! [`FlowEditor`] ties the kinds to the graph store: it seeds per-kind
//! defaults on add, recomputes outputs after edits, and runs the async
//! selection/upload/chat/generation actions.

pub mod catalog;
pub mod chat;
pub mod editor;
pub mod error;
pub mod generator;
pub mod output;
pub mod selector;
pub mod support;

// Re-export key types
pub use catalog::{default_fields, is_disabled, metadata, NodeCategory, NodeMetadata};
pub use chat::ChatFields;
pub use editor::FlowEditor;
pub use error::{NodeActionError, Result};
pub use generator::{CarouselFields, GeneratorFields, SlideSpec};
pub use output::compute_output;
pub use selector::{SelectOption, SelectorFields};
pub use support::{ColorsFields, LogoFields, ReferenceImageFields, StylesFields, SubjectFields};
