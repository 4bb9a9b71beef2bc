//! In-memory bucket client

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use md5::{Digest, Md5};
use std::collections::HashMap;

use super::traits::{BucketClient, ListQuery, ListResult, ObjectSummary, StorageError};

/// One stored object.
struct StoredObject {
    data: Bytes,
    etag: String,
    last_modified: DateTime<Utc>,
    user_metadata: HashMap<String, String>,
}

/// In-memory bucket backend.
///
/// Implements the same listing semantics as the S3 backend (sorted
/// keys, marker continuation, delimiter grouping) so binding behavior
/// can be exercised without a live service.
#[derive(Default)]
pub struct MemoryClient {
    objects: DashMap<String, StoredObject>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    fn compute_etag(data: &[u8]) -> String {
        let mut hasher = Md5::new();
        hasher.update(data);
        format!("\"{}\"", hex::encode(hasher.finalize()))
    }
}

#[async_trait]
impl BucketClient for MemoryClient {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        user_metadata: HashMap<String, String>,
    ) -> Result<(), StorageError> {
        let etag = Self::compute_etag(&data);
        self.objects.insert(
            key.to_string(),
            StoredObject {
                data,
                etag,
                last_modified: Utc::now(),
                user_metadata,
            },
        );
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Bytes, StorageError> {
        let obj = self
            .objects
            .get(key)
            .ok_or_else(|| StorageError::not_found(key))?;
        Ok(obj.data.clone())
    }

    async fn object_metadata(&self, key: &str) -> Result<HashMap<String, String>, StorageError> {
        let obj = self
            .objects
            .get(key)
            .ok_or_else(|| StorageError::not_found(key))?;

        let mut metadata = HashMap::new();
        metadata.insert("Content-Length".to_string(), obj.data.len().to_string());
        metadata.insert("Etag".to_string(), obj.etag.clone());
        metadata.insert(
            "Last-Modified".to_string(),
            obj.last_modified
                .format("%a, %d %b %Y %H:%M:%S GMT")
                .to_string(),
        );
        for (name, value) in &obj.user_metadata {
            metadata.insert(name.clone(), value.clone());
        }
        Ok(metadata)
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        // Idempotent, as with S3
        self.objects.remove(key);
        Ok(())
    }

    async fn list_objects(&self, query: &ListQuery) -> Result<ListResult, StorageError> {
        let max_keys = usize::try_from(query.maxkeys).unwrap_or(0);

        let mut keys: Vec<String> = self.objects.iter().map(|e| e.key().clone()).collect();
        keys.sort();

        let mut objects = Vec::new();
        let mut common_prefixes: Vec<String> = Vec::new();
        let mut is_truncated = false;
        let mut next_marker = String::new();

        for key in keys {
            if !key.starts_with(&query.prefix) {
                continue;
            }
            if !query.marker.is_empty() && key.as_str() <= query.marker.as_str() {
                continue;
            }

            if !query.delimiter.is_empty() {
                let suffix = &key[query.prefix.len()..];
                if let Some(pos) = suffix.find(&query.delimiter) {
                    let group =
                        format!("{}{}", query.prefix, &suffix[..pos + query.delimiter.len()]);
                    // Keys are sorted, so duplicate groups are adjacent
                    if common_prefixes.last() == Some(&group) {
                        next_marker = key;
                        continue;
                    }
                    if objects.len() + common_prefixes.len() >= max_keys {
                        is_truncated = true;
                        break;
                    }
                    common_prefixes.push(group);
                    next_marker = key;
                    continue;
                }
            }

            if objects.len() + common_prefixes.len() >= max_keys {
                is_truncated = true;
                break;
            }

            // Entry may be deleted between the key snapshot and here
            let Some(obj) = self.objects.get(&key) else {
                continue;
            };
            objects.push(ObjectSummary {
                key: key.clone(),
                etag: obj.etag.clone(),
                size: obj.data.len() as u64,
                last_modified: obj.last_modified,
                storage_class: "STANDARD".to_string(),
            });
            drop(obj);
            next_marker = key;
        }

        if !is_truncated {
            next_marker.clear();
        }

        Ok(ListResult {
            objects,
            common_prefixes,
            is_truncated,
            next_marker,
        })
    }
}
