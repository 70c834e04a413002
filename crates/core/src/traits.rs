//! ObjectStore trait definition
//!
//! This trait defines the interface for bucket-scoped storage operations.
//! It allows the CLI to be decoupled from the Cloud Storage SDK.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::path::ObjectRef;

/// Metadata for an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object name
    pub name: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Human-readable size
    pub size_human: String,

    /// Last update timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo
    pub fn new(name: impl Into<String>, size: i64) -> Self {
        Self {
            name: name.into(),
            size_bytes: size,
            size_human: humansize::format_size(size.max(0) as u64, humansize::BINARY),
            updated: None,
            content_type: None,
        }
    }
}

/// Result of a single list request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    /// Listed objects, in the order the service returned them
    pub items: Vec<ObjectInfo>,

    /// Token for the next page, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only return names starting with this prefix
    pub prefix: Option<String>,

    /// Page token from a previous response
    pub page_token: Option<String>,

    /// Maximum number of results per page
    pub max_results: Option<i32>,
}

/// Trait for bucket-scoped object storage operations
///
/// Implemented by the Cloud Storage adapter and by test doubles.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of objects in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult>;

    /// Get object metadata, or `None` if the object does not exist
    async fn head_object(&self, object: &ObjectRef) -> Result<Option<ObjectInfo>>;

    /// Create or overwrite an object with the given bytes
    async fn put_object(
        &self,
        object: &ObjectRef,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo>;

    /// Get the full object content
    async fn get_object(&self, object: &ObjectRef) -> Result<Vec<u8>>;

    /// Server-side copy of an object
    async fn copy_object(&self, src: &ObjectRef, dst: &ObjectRef) -> Result<ObjectInfo>;

    /// Delete an object
    async fn delete_object(&self, object: &ObjectRef) -> Result<()>;
}
