//! Selector node field model
//!
//! Selector nodes pick a record from the remote store, with the option
//! list filtered by the id of the record selected upstream (campaigns by
//! client, plannings by campaign, analyses by client). Selection is a
//! two-step flow: the user picks from the fetched list, the node fetches
//! that item's full record, and only then is the output set.
//!
//! Rapid re-selection can complete out of order, so every in-flight
//! request carries a monotonic per-node token; a completion whose token
//! is older than the node's current one is discarded instead of
//! overwriting newer state.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in a selector's option list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    /// Build an option from a raw record, preferring `name`, then `title`
    pub fn from_record(record: &Value) -> Option<Self> {
        let id = record.get("id")?.as_str()?.to_string();
        let label = record
            .get("name")
            .or_else(|| record.get("title"))
            .and_then(|v| v.as_str())
            .unwrap_or(&id)
            .to_string();
        Some(Self { id, label })
    }
}

/// Editable state of a selector node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorFields {
    /// Fetched option list, filtered by the upstream id
    pub options: Vec<SelectOption>,
    /// Id of the option the user picked
    pub selected_id: Option<String>,
    /// Full record fetched after picking; becomes the output data
    pub selected_record: Option<Value>,
    /// Node-owned loading indicator
    pub loading: bool,
    /// Monotonic token of the newest request issued by this node
    pub request_seq: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_prefers_name_over_title() {
        let record = serde_json::json!({"id": "c1", "name": "Acme", "title": "ignored"});
        let option = SelectOption::from_record(&record).unwrap();
        assert_eq!(option.label, "Acme");
    }

    #[test]
    fn option_falls_back_to_title_then_id() {
        let record = serde_json::json!({"id": "k1", "title": "Guia da marca"});
        assert_eq!(
            SelectOption::from_record(&record).unwrap().label,
            "Guia da marca"
        );

        let bare = serde_json::json!({"id": "k2"});
        assert_eq!(SelectOption::from_record(&bare).unwrap().label, "k2");
    }

    #[test]
    fn record_without_id_is_not_an_option() {
        assert!(SelectOption::from_record(&serde_json::json!({"name": "x"})).is_none());
    }

    #[test]
    fn fields_roundtrip_through_node_data() {
        let fields = SelectorFields {
            options: vec![SelectOption {
                id: "c1".to_string(),
                label: "Acme".to_string(),
            }],
            selected_id: Some("c1".to_string()),
            selected_record: Some(serde_json::json!({"id": "c1"})),
            loading: false,
            request_seq: 3,
        };
        let value = serde_json::to_value(&fields).unwrap();
        let restored: SelectorFields = serde_json::from_value(value).unwrap();
        assert_eq!(restored, fields);
    }
}
