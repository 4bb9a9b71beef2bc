//! Bucket output binding

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use rustbind_core::{
    BindingError, InvokeRequest, InvokeResponse, Metadata, OperationKind, OutputBinding,
};

use crate::client::{BucketClient, ListQuery, S3Client, DEFAULT_MAX_KEYS};
use crate::config::ConnectionConfig;

/// Reserved metadata entry naming the object's storage key.
pub const METADATA_KEY: &str = "key";

/// Output binding for an S3-compatible object-storage bucket.
///
/// Holds exactly one configuration and one client handle for its
/// lifetime; invocations keep no per-request state, so concurrent
/// calls share nothing but the read-only handle.
#[derive(Default)]
pub struct S3BucketBinding {
    config: Option<ConnectionConfig>,
    client: Option<Arc<dyn BucketClient>>,
}

impl S3BucketBinding {
    /// Create an uninitialized binding; `init` must run before `invoke`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an initialized binding over a custom client, bypassing
    /// SDK client construction. Used by tests and embedders with their
    /// own backend.
    pub fn with_client(config: ConnectionConfig, client: Arc<dyn BucketClient>) -> Self {
        Self {
            config: Some(config),
            client: Some(client),
        }
    }

    /// The parsed connection configuration, if initialized.
    pub fn config(&self) -> Option<&ConnectionConfig> {
        self.config.as_ref()
    }

    fn client(&self) -> Result<&Arc<dyn BucketClient>, BindingError> {
        self.client
            .as_ref()
            .ok_or_else(|| BindingError::ClientInit("binding is not initialized".to_string()))
    }

    /// The `key` metadata entry, required and non-empty for get/delete.
    fn required_key(metadata: &HashMap<String, String>) -> Result<&str, BindingError> {
        match metadata.get(METADATA_KEY) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(BindingError::MissingKey),
        }
    }

    async fn create(&self, req: InvokeRequest) -> Result<InvokeResponse, BindingError> {
        let key = match req.metadata.get(METADATA_KEY) {
            Some(key) if !key.is_empty() => key.clone(),
            _ => {
                // The generated key is not returned to the caller; a
                // caller that needs the key must supply its own.
                let generated = Uuid::new_v4().to_string();
                debug!(key = %generated, "no object key supplied, generated one");
                generated
            }
        };

        let user_metadata: HashMap<String, String> = req
            .metadata
            .iter()
            .filter(|(name, _)| name.as_str() != METADATA_KEY)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        self.client()?
            .put_object(&key, req.data, user_metadata)
            .await
            .map_err(BindingError::write)?;

        Ok(InvokeResponse::empty())
    }

    async fn get(&self, req: InvokeRequest) -> Result<InvokeResponse, BindingError> {
        let key = Self::required_key(&req.metadata)?;
        let client = self.client()?;

        let data = match client.get_object(key).await {
            Ok(data) => data,
            // Not-found is deliberately not an error: the caller
            // distinguishes it by response emptiness.
            Err(err) if err.is_not_found() => {
                debug!(key, "object not found, returning empty response");
                return Ok(InvokeResponse::empty());
            }
            Err(err) => return Err(BindingError::read(err)),
        };

        let metadata = client
            .object_metadata(key)
            .await
            .map_err(BindingError::read)?;

        Ok(InvokeResponse { data, metadata })
    }

    async fn delete(&self, req: InvokeRequest) -> Result<InvokeResponse, BindingError> {
        let key = Self::required_key(&req.metadata)?;

        self.client()?
            .delete_object(key)
            .await
            .map_err(BindingError::delete)?;

        Ok(InvokeResponse::empty())
    }

    async fn list(&self, req: InvokeRequest) -> Result<InvokeResponse, BindingError> {
        let mut query: ListQuery =
            serde_json::from_slice(&req.data).map_err(BindingError::QueryParse)?;
        if query.maxkeys == 0 {
            query.maxkeys = DEFAULT_MAX_KEYS;
        }

        let result = self
            .client()?
            .list_objects(&query)
            .await
            .map_err(BindingError::list)?;

        let data = serde_json::to_vec(&result).map_err(BindingError::ResponseEncode)?;

        Ok(InvokeResponse {
            data: data.into(),
            metadata: HashMap::new(),
        })
    }
}

#[async_trait]
impl OutputBinding for S3BucketBinding {
    async fn init(&mut self, metadata: Metadata) -> Result<(), BindingError> {
        let config = ConnectionConfig::from_properties(&metadata.properties);
        let client = S3Client::new(&config)?;
        self.client = Some(Arc::new(client));
        self.config = Some(config);
        Ok(())
    }

    fn operations(&self) -> Vec<OperationKind> {
        vec![
            OperationKind::Create,
            OperationKind::Get,
            OperationKind::Delete,
            OperationKind::List,
        ]
    }

    async fn invoke(&self, req: InvokeRequest) -> Result<InvokeResponse, BindingError> {
        match req.operation {
            OperationKind::Create => self.create(req).await,
            OperationKind::Get => self.get(req).await,
            OperationKind::Delete => self.delete(req).await,
            OperationKind::List => self.list(req).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_key_rejects_absent_and_empty() {
        let mut metadata = HashMap::new();
        assert!(matches!(
            S3BucketBinding::required_key(&metadata),
            Err(BindingError::MissingKey)
        ));

        metadata.insert(METADATA_KEY.to_string(), String::new());
        assert!(matches!(
            S3BucketBinding::required_key(&metadata),
            Err(BindingError::MissingKey)
        ));

        metadata.insert(METADATA_KEY.to_string(), "a.txt".to_string());
        assert_eq!(S3BucketBinding::required_key(&metadata).unwrap(), "a.txt");
    }

    #[tokio::test]
    async fn test_invoke_before_init_fails() {
        let binding = S3BucketBinding::new();
        let req = InvokeRequest::new(OperationKind::Create);
        let err = binding.invoke(req).await.unwrap_err();
        assert!(matches!(err, BindingError::ClientInit(_)));
    }

    #[tokio::test]
    async fn test_init_parses_properties_and_builds_client() {
        let mut binding = S3BucketBinding::new();
        let mut properties = HashMap::new();
        properties.insert("endpoint".to_string(), "https://s3.example.com".to_string());
        properties.insert("accessKeyID".to_string(), "id".to_string());
        properties.insert("accessKey".to_string(), "secret".to_string());
        properties.insert("bucket".to_string(), "test".to_string());

        binding.init(Metadata::new(properties)).await.unwrap();

        let config = binding.config().unwrap();
        assert_eq!(config.endpoint, "https://s3.example.com");
        assert_eq!(config.bucket, "test");
    }

    #[tokio::test]
    async fn test_init_rejects_malformed_endpoint() {
        let mut binding = S3BucketBinding::new();
        let mut properties = HashMap::new();
        properties.insert("endpoint".to_string(), "not a url".to_string());

        let err = binding.init(Metadata::new(properties)).await.unwrap_err();
        assert!(matches!(err, BindingError::ClientInit(_)));
    }

    #[test]
    fn test_operations_advertises_all_four() {
        let binding = S3BucketBinding::new();
        assert_eq!(
            binding.operations(),
            vec![
                OperationKind::Create,
                OperationKind::Get,
                OperationKind::Delete,
                OperationKind::List,
            ]
        );
    }
}
