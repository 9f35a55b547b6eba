//! Chat node field model
//!
//! A conversation with the AI assistant through the chat proxy. The
//! node's output is the assistant's latest reply, so downstream nodes can
//! consume generated copy.

use serde::{Deserialize, Serialize};
use serde_json::json;

use designflow_remote::ChatMessage;

/// Editable state of a chat node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatFields {
    pub messages: Vec<ChatMessage>,
    /// Node-owned loading indicator while a completion runs
    pub pending: bool,
}

impl ChatFields {
    /// The assistant's latest reply, or `None` before any exchange
    pub fn output_data(&self) -> Option<serde_json::Value> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "assistant")
            .map(|m| json!({ "text": m.content }))
    }
}
