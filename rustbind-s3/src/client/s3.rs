//! SDK-backed bucket client for S3-compatible endpoints

use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::{ByteStream, DateTime};
use bytes::Bytes;
use chrono::Utc;
use std::collections::HashMap;
use url::Url;

use rustbind_core::BindingError;

use super::traits::{BucketClient, ListQuery, ListResult, ObjectSummary, StorageError};
use crate::config::ConnectionConfig;

/// Signing region for endpoints that do not encode one. S3-compatible
/// services accept any region name as long as signing is consistent.
const DEFAULT_REGION: &str = "us-east-1";

/// Bucket client backed by the AWS S3 SDK, pointed at a custom
/// endpoint with static credentials and path-style addressing. This is
/// how S3-compatible object stores (MinIO, OSS-style services) are
/// reached.
#[derive(Debug)]
pub struct S3Client {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// Build a client handle from the connection configuration.
    ///
    /// Construction performs no network I/O. A malformed (non-empty)
    /// endpoint is the only thing rejected here; missing fields fail
    /// later, when the service refuses the call.
    pub fn new(config: &ConnectionConfig) -> Result<Self, BindingError> {
        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(DEFAULT_REGION))
            .credentials_provider(Credentials::new(
                config.access_key_id.clone(),
                config.access_key_secret.clone(),
                None,
                None,
                "rustbind",
            ))
            .force_path_style(true);

        if !config.endpoint.is_empty() {
            Url::parse(&config.endpoint).map_err(|err| {
                BindingError::ClientInit(format!(
                    "invalid endpoint `{}`: {err}",
                    config.endpoint
                ))
            })?;
            builder = builder.endpoint_url(&config.endpoint);
        }

        Ok(Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }

    fn http_date(timestamp: &DateTime) -> String {
        chrono::DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
            .unwrap_or_default()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    fn chrono_time(timestamp: Option<&DateTime>) -> chrono::DateTime<Utc> {
        timestamp
            .and_then(|t| chrono::DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
            .unwrap_or_default()
    }
}

#[async_trait]
impl BucketClient for S3Client {
    async fn put_object(
        &self,
        key: &str,
        data: Bytes,
        user_metadata: HashMap<String, String>,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_metadata(Some(user_metadata))
            .send()
            .await
            .map_err(StorageError::service)?;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<Bytes, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(GetObjectError::is_no_such_key)
                {
                    StorageError::not_found(key)
                } else {
                    StorageError::service(err)
                }
            })?;

        let body = output
            .body
            .collect()
            .await
            .map_err(StorageError::service)?;
        Ok(body.into_bytes())
    }

    async fn object_metadata(&self, key: &str) -> Result<HashMap<String, String>, StorageError> {
        let output = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(HeadObjectError::is_not_found)
                {
                    StorageError::not_found(key)
                } else {
                    StorageError::service(err)
                }
            })?;

        let mut metadata = HashMap::new();
        if let Some(content_type) = output.content_type() {
            metadata.insert("Content-Type".to_string(), content_type.to_string());
        }
        if let Some(content_length) = output.content_length() {
            metadata.insert("Content-Length".to_string(), content_length.to_string());
        }
        if let Some(etag) = output.e_tag() {
            metadata.insert("Etag".to_string(), etag.to_string());
        }
        if let Some(last_modified) = output.last_modified() {
            metadata.insert("Last-Modified".to_string(), Self::http_date(last_modified));
        }
        for (name, value) in output.metadata().into_iter().flatten() {
            metadata.insert(name.clone(), value.clone());
        }

        Ok(metadata)
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(StorageError::service)?;
        Ok(())
    }

    async fn list_objects(&self, query: &ListQuery) -> Result<ListResult, StorageError> {
        let mut request = self
            .client
            .list_objects()
            .bucket(&self.bucket)
            .max_keys(query.maxkeys);
        if !query.prefix.is_empty() {
            request = request.prefix(&query.prefix);
        }
        if !query.marker.is_empty() {
            request = request.marker(&query.marker);
        }
        if !query.delimiter.is_empty() {
            request = request.delimiter(&query.delimiter);
        }

        let output = request.send().await.map_err(StorageError::service)?;

        let objects: Vec<ObjectSummary> = output
            .contents()
            .iter()
            .map(|obj| ObjectSummary {
                key: obj.key().unwrap_or_default().to_string(),
                etag: obj.e_tag().unwrap_or_default().to_string(),
                size: u64::try_from(obj.size().unwrap_or_default()).unwrap_or_default(),
                last_modified: Self::chrono_time(obj.last_modified()),
                storage_class: obj
                    .storage_class()
                    .map_or_else(|| "STANDARD".to_string(), |class| class.as_str().to_string()),
            })
            .collect();

        let common_prefixes = output
            .common_prefixes()
            .iter()
            .filter_map(|prefix| prefix.prefix())
            .map(String::from)
            .collect();

        let is_truncated = output.is_truncated().unwrap_or_default();

        // Without a delimiter the service omits NextMarker; the last
        // returned key continues the listing.
        let next_marker = match output.next_marker() {
            Some(marker) => marker.to_string(),
            None if is_truncated => objects.last().map(|o| o.key.clone()).unwrap_or_default(),
            None => String::new(),
        };

        Ok(ListResult {
            objects,
            common_prefixes,
            is_truncated,
            next_marker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_endpoint_is_rejected() {
        let config = ConnectionConfig {
            endpoint: "not a url".to_string(),
            ..ConnectionConfig::default()
        };
        let err = S3Client::new(&config).unwrap_err();
        assert!(matches!(err, BindingError::ClientInit(_)));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_empty_endpoint_is_not_validated() {
        // Absence of endpoint/bucket only surfaces at call time
        assert!(S3Client::new(&ConnectionConfig::default()).is_ok());
    }

    #[test]
    fn test_http_date_format() {
        let formatted = S3Client::http_date(&DateTime::from_secs(0));
        assert_eq!(formatted, "Thu, 01 Jan 1970 00:00:00 GMT");
    }
}
