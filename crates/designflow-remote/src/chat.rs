//! Chat completion proxy client
//!
//! The chat node talks to an OpenAI-compatible completion endpoint
//! through a thin serverless proxy; this client models just the request
//! and response shapes the node needs.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, Result};
use crate::rest::RemoteConfig;

/// One message in a chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "user", "assistant", or "system"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

/// Send a conversation, receive the assistant's reply
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// Chat client speaking to the proxy endpoint
pub struct RestChatClient {
    http: reqwest::Client,
    config: RemoteConfig,
    model: String,
}

impl RestChatClient {
    pub fn new(config: RemoteConfig, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatClient for RestChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/functions/v1/chat", self.config.base_url);
        log::debug!("POST {} ({} messages)", url, messages.len());
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(RemoteError::Api {
                status: 502,
                message: "completion returned no choices".to_string(),
            })
    }
}
