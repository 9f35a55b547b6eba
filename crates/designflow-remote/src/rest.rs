//! REST implementations of the remote contracts
//!
//! Speaks PostgREST-style conventions: `/rest/v1/{resource}` with
//! `column=eq.value` query filters and `apikey`/`Authorization` headers,
//! plus `/storage/v1/object` uploads that resolve to public URLs.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{RemoteError, Result};
use crate::store::{FileStorage, Filter, RecordStore};

/// Connection settings for the remote backend
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL, e.g. `https://project.example.co`
    pub base_url: String,
    /// API key sent as `apikey` and bearer token
    pub api_key: String,
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read settings from `DESIGNFLOW_API_URL` / `DESIGNFLOW_API_KEY`
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("DESIGNFLOW_API_URL")
            .map_err(|_| RemoteError::MissingConfig("DESIGNFLOW_API_URL".to_string()))?;
        let api_key = std::env::var("DESIGNFLOW_API_KEY")
            .map_err(|_| RemoteError::MissingConfig("DESIGNFLOW_API_KEY".to_string()))?;
        Ok(Self::new(base_url, api_key))
    }
}

/// Build the query string for a filtered list request
fn filter_query(filters: &[Filter]) -> String {
    let mut query = String::from("select=*");
    for filter in filters {
        query.push_str(&format!("&{}=eq.{}", filter.column, filter.value));
    }
    query
}

/// Object path for an uploaded file
fn object_path(owner_id: &str, project_id: &str, file_name: &str) -> String {
    format!("{}/{}/{}", owner_id, project_id, file_name)
}

/// Record store backed by the REST API
pub struct RestRecordStore {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl RestRecordStore {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, resource)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn list(&self, resource: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        let url = format!("{}?{}", self.resource_url(resource), filter_query(filters));
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let records: Vec<Value> = Self::check(response).await?.json().await?;
        Ok(records)
    }

    async fn get(&self, resource: &str, id: &str) -> Result<Option<Value>> {
        let records = self
            .list(resource, &[Filter::eq("id", id)])
            .await?;
        Ok(records.into_iter().next())
    }

    async fn insert(&self, resource: &str, record: Value) -> Result<Value> {
        let url = self.resource_url(resource);
        log::debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        let mut stored: Vec<Value> = Self::check(response).await?.json().await?;
        stored.pop().ok_or(RemoteError::Api {
            status: 500,
            message: "insert returned no representation".to_string(),
        })
    }
}

/// File storage backed by the REST object API
pub struct RestFileStorage {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl RestFileStorage {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Public URL of an object in a category bucket
    pub fn public_url(&self, category: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.base_url, category, path
        )
    }
}

#[async_trait]
impl FileStorage for RestFileStorage {
    async fn upload(
        &self,
        owner_id: &str,
        project_id: &str,
        category: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let path = object_path(owner_id, project_id, file_name);
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url, category, path
        );
        log::debug!("POST {} ({} bytes)", url, bytes.len());
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .body(bytes)
            .send()
            .await?;
        RestRecordStore::check(response).await?;
        Ok(self.public_url(category, &path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_query_builds_postgrest_filters() {
        let query = filter_query(&[
            Filter::eq("client_id", "c1"),
            Filter::eq("status", "active"),
        ]);
        assert_eq!(query, "select=*&client_id=eq.c1&status=eq.active");
    }

    #[test]
    fn filter_query_without_filters_selects_all() {
        assert_eq!(filter_query(&[]), "select=*");
    }

    #[test]
    fn object_paths_are_owner_scoped() {
        assert_eq!(
            object_path("u1", "flow-3", "logo.svg"),
            "u1/flow-3/logo.svg"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = RemoteConfig::new("https://api.example.co/", "key");
        assert_eq!(config.base_url, "https://api.example.co");
    }

    #[test]
    fn public_url_shape() {
        let storage = RestFileStorage::new(RemoteConfig::new("https://api.example.co", "key"));
        assert_eq!(
            storage.public_url("reference_images", "u1/flow-3/a.png"),
            "https://api.example.co/storage/v1/object/public/reference_images/u1/flow-3/a.png"
        );
    }
}
