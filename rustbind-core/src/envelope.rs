//! Invocation envelope types exchanged with the host runtime

use bytes::Bytes;
use std::collections::HashMap;

use crate::binding::OperationKind;

/// Untyped component properties handed to a binding at initialization.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub properties: HashMap<String, String>,
}

impl Metadata {
    pub fn new(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }
}

impl From<HashMap<String, String>> for Metadata {
    fn from(properties: HashMap<String, String>) -> Self {
        Self { properties }
    }
}

/// A single invocation of a binding operation.
///
/// Supplied by the caller per call and not retained by the binding.
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    pub operation: OperationKind,
    pub data: Bytes,
    pub metadata: HashMap<String, String>,
}

impl InvokeRequest {
    /// Create a request for `operation` with empty payload and metadata.
    pub fn new(operation: OperationKind) -> Self {
        Self {
            operation,
            data: Bytes::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// The result of a binding invocation. Ownership transfers to the caller.
#[derive(Debug, Clone, Default)]
pub struct InvokeResponse {
    pub data: Bytes,
    pub metadata: HashMap<String, String>,
}

impl InvokeResponse {
    /// The empty response, returned by operations that produce no payload.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.metadata.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response() {
        let resp = InvokeResponse::empty();
        assert!(resp.is_empty());
        assert!(resp.data.is_empty());
        assert!(resp.metadata.is_empty());
    }

    #[test]
    fn test_request_builders() {
        let req = InvokeRequest::new(OperationKind::Create)
            .with_data("hello")
            .with_metadata("key", "a.txt");

        assert_eq!(req.operation, OperationKind::Create);
        assert_eq!(&req.data[..], b"hello");
        assert_eq!(req.metadata.get("key").map(String::as_str), Some("a.txt"));
    }
}
