//! Bucket client trait and data types

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Page size applied to list operations when the query asks for zero.
pub const DEFAULT_MAX_KEYS: i32 = 1000;

/// Errors from bucket operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object not found: {key}")]
    NotFound { key: String },

    #[error("Storage service error")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn service(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Service(Box::new(err))
    }

    /// Whether this error means the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Filters for a single listing call.
///
/// Field names match the wire JSON of the list request body. A
/// `maxkeys` of zero means "use [`DEFAULT_MAX_KEYS`]"; the binding
/// normalizes it before the client sees the query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub marker: String,
    pub prefix: String,
    pub maxkeys: i32,
    pub delimiter: String,
}

/// One page of a listing, re-serialized into the response body.
///
/// No automatic pagination: a truncated result carries the marker to
/// pass in a follow-up query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    pub objects: Vec<ObjectSummary>,
    pub common_prefixes: Vec<String>,
    pub is_truncated: bool,
    pub next_marker: String,
}

/// Summary of an object in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub key: String,
    pub etag: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub storage_class: String,
}

/// A client handle scoped to one bucket of one storage account.
///
/// Implementations are immutable after construction; the binding shares
/// a single handle across concurrent invocations.
#[async_trait]
pub trait BucketClient: Send + Sync {
    /// Store the full payload under `key` in a single put, attaching
    /// `user_metadata` as object-level custom metadata.
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        user_metadata: HashMap<String, String>,
    ) -> Result<(), StorageError>;

    /// Fetch the object body.
    async fn get_object(&self, key: &str) -> Result<Bytes, StorageError>;

    /// Fetch the object's detailed metadata as a flat string map.
    /// Multi-valued headers are flattened by joining values with a
    /// single space.
    async fn object_metadata(&self, key: &str) -> Result<HashMap<String, String>, StorageError>;

    /// Delete the object. Behavior for a missing key is whatever the
    /// backing service defines.
    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// Perform a single listing call with the query's filters.
    async fn list_objects(&self, query: &ListQuery) -> Result<ListResult, StorageError>;
}
