//! Generation request service client
//!
//! The generator node's responsibility ends at producing a correct
//! `DesignConfig`; this client ships it. The service renders the prompt
//! server-side with the same assembly algorithm and returns the
//! generated artifacts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use designflow_prompt::DesignConfig;

use crate::error::{RemoteError, Result};
use crate::rest::RemoteConfig;

/// One artifact returned by the generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAsset {
    pub id: String,
    /// Public URL of the generated image or content
    pub url: String,
}

/// Submit a design config for generation
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, config: &DesignConfig) -> Result<Vec<GeneratedAsset>>;
}

/// Generation client speaking to the proxy endpoint
pub struct RestGenerationClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl RestGenerationClient {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl GenerationClient for RestGenerationClient {
    async fn generate(&self, design: &DesignConfig) -> Result<Vec<GeneratedAsset>> {
        let url = format!("{}/functions/v1/generate", self.config.base_url);
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(design)
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
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_shape_roundtrips() {
        let asset = GeneratedAsset {
            id: "a1".to_string(),
            url: "https://cdn.example.co/a1.png".to_string(),
        };
        let json = serde_json::to_string(&asset).unwrap();
        let restored: GeneratedAsset = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, asset);
    }
}
