//! Remote record store and file storage contracts
//!
//! The core only ever talks to the backing data store through read-by-
//! filter, read-by-id, and a generic record insert; the schema behind
//! those operations is not this crate's concern. File storage is equally
//! opaque: bytes in, public URL out.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// An equality filter on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Read and insert records in the remote data store
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List records of a resource matching all filters
    async fn list(&self, resource: &str, filters: &[Filter]) -> Result<Vec<Value>>;

    /// Fetch a single record by id
    async fn get(&self, resource: &str, id: &str) -> Result<Option<Value>>;

    /// Insert a record, returning the stored representation
    async fn insert(&self, resource: &str, record: Value) -> Result<Value>;
}

/// Upload files and receive public URLs
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Upload a file under an owner/project scope and asset category
    ///
    /// Returns the public URL of the stored object.
    async fn upload(
        &self,
        owner_id: &str,
        project_id: &str,
        category: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String>;
}
