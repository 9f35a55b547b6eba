//! In-memory test doubles for the remote contracts
//!
//! Used by node tests to exercise selector, upload, and chat flows
//! without a network. All doubles record what they were asked so tests
//! can assert on calls as well as results.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use designflow_prompt::DesignConfig;

use crate::chat::{ChatClient, ChatMessage};
use crate::error::{RemoteError, Result};
use crate::generation::{GeneratedAsset, GenerationClient};
use crate::store::{FileStorage, Filter, RecordStore};

/// In-memory record store seeded per resource
#[derive(Default)]
pub struct MockRecordStore {
    records: Mutex<HashMap<String, Vec<Value>>>,
    /// When set, every call fails with this message
    fail_with: Mutex<Option<String>>,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed records into a resource
    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        self.records
            .lock()
            .unwrap()
            .entry(resource.to_string())
            .or_default()
            .extend(records);
    }

    /// Make every subsequent call fail
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }

    fn check_failure(&self) -> Result<()> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(RemoteError::Api {
                status: 500,
                message,
            });
        }
        Ok(())
    }
}

fn matches_filters(record: &Value, filters: &[Filter]) -> bool {
    filters.iter().all(|f| {
        record
            .get(&f.column)
            .map(|v| match v {
                Value::String(s) => s == &f.value,
                other => other.to_string() == f.value,
            })
            .unwrap_or(false)
    })
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn list(&self, resource: &str, filters: &[Filter]) -> Result<Vec<Value>> {
        self.check_failure()?;
        let records = self.records.lock().unwrap();
        Ok(records
            .get(resource)
            .map(|all| {
                all.iter()
                    .filter(|r| matches_filters(r, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get(&self, resource: &str, id: &str) -> Result<Option<Value>> {
        let matches = self.list(resource, &[Filter::eq("id", id)]).await?;
        Ok(matches.into_iter().next())
    }

    async fn insert(&self, resource: &str, record: Value) -> Result<Value> {
        self.check_failure()?;
        self.records
            .lock()
            .unwrap()
            .entry(resource.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }
}

/// File storage returning deterministic URLs
#[derive(Default)]
pub struct MockFileStorage {
    uploads: Mutex<Vec<String>>,
    fail_with: Mutex<Option<String>>,
}

impl MockFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of every upload performed
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn fail_with(&self, message: impl Into<String>) {
        *self.fail_with.lock().unwrap() = Some(message.into());
    }
}

#[async_trait]
impl FileStorage for MockFileStorage {
    async fn upload(
        &self,
        owner_id: &str,
        project_id: &str,
        category: &str,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<String> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(RemoteError::Api {
                status: 500,
                message,
            });
        }
        let path = format!("{}/{}/{}/{}", category, owner_id, project_id, file_name);
        self.uploads.lock().unwrap().push(path.clone());
        Ok(format!("https://storage.test/{}", path))
    }
}

/// Chat client answering with a canned reply
pub struct MockChatClient {
    pub reply: String,
}

impl MockChatClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        Ok(self.reply.clone())
    }
}

/// Generation client recording submitted configs
#[derive(Default)]
pub struct MockGenerationClient {
    configs: Mutex<Vec<DesignConfig>>,
}

impl MockGenerationClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every config submitted so far
    pub fn submitted(&self) -> Vec<DesignConfig> {
        self.configs.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationClient for MockGenerationClient {
    async fn generate(&self, config: &DesignConfig) -> Result<Vec<GeneratedAsset>> {
        self.configs.lock().unwrap().push(config.clone());
        Ok(vec![GeneratedAsset {
            id: "generated-1".to_string(),
            url: "https://storage.test/generated-1.png".to_string(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_store_filters_by_column() {
        let store = MockRecordStore::new();
        store.seed(
            "campaigns",
            vec![
                serde_json::json!({"id": "m1", "client_id": "c1", "name": "Natal"}),
                serde_json::json!({"id": "m2", "client_id": "c2", "name": "Verão"}),
            ],
        );

        let matches = store
            .list("campaigns", &[Filter::eq("client_id", "c1")])
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["id"], "m1");
    }

    #[tokio::test]
    async fn mock_store_get_by_id() {
        let store = MockRecordStore::new();
        store.seed("clients", vec![serde_json::json!({"id": "c1"})]);

        assert!(store.get("clients", "c1").await.unwrap().is_some());
        assert!(store.get("clients", "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mock_store_failure_mode() {
        let store = MockRecordStore::new();
        store.fail_with("offline");
        assert!(store.list("clients", &[]).await.is_err());
    }

    #[tokio::test]
    async fn mock_storage_returns_public_url() {
        let storage = MockFileStorage::new();
        let url = storage
            .upload("u1", "flow-1", "logos", "logo.svg", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(url, "https://storage.test/logos/u1/flow-1/logo.svg");
        assert_eq!(storage.uploads().len(), 1);
    }
}
