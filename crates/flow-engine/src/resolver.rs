//! Upstream data resolver
//!
//! Computes the set of values a node receives from the nodes connected as
//! its inputs. The result is a pure function of (edges, node outputs) and
//! is recomputed on every demand — never cached across state changes, so
//! resolved inputs always reflect the latest upstream output.

use std::collections::HashMap;

use crate::types::{Flow, NodeOutput};

/// Resolved inputs for one node, keyed by source kind
///
/// When several sources of the same kind feed one target, the first (in
/// edge-list order) keeps the bare kind key and subsequent ones are
/// suffixed `_2`, `_3`, ...
pub type UpstreamInputMap = HashMap<String, NodeOutput>;

/// Resolve the inputs visible to `node_id` from the current flow state
///
/// Follows incoming edges in edge-list (insertion) order to their source
/// nodes' outputs. Sources exposing no output contribute nothing: a
/// disconnected or empty upstream simply does not appear in the map, and
/// a node with no incoming edges resolves to an empty map.
pub fn resolve_upstream(flow: &Flow, node_id: &str) -> UpstreamInputMap {
    let mut map = UpstreamInputMap::new();
    let mut seen: HashMap<&'static str, usize> = HashMap::new();

    for edge in flow.incoming_edges(node_id) {
        let Some(source) = flow.find_node(&edge.source) else {
            // Dangling edge; the loader drops these, but a mid-session
            // delete can leave one visible for a single recomputation.
            continue;
        };
        let Some(output) = source.data.output.clone() else {
            continue;
        };
        let base = source.kind.as_key();
        let count = seen.entry(base).and_modify(|c| *c += 1).or_insert(1);
        let key = if *count == 1 {
            base.to_string()
        } else {
            format!("{}_{}", base, count)
        };
        map.insert(key, output);
    }

    map
}
