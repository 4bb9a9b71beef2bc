//! Binding error taxonomy

use thiserror::Error;

/// Boxed source error from an underlying storage SDK.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by binding initialization and invocation.
///
/// Every error returns immediately to the caller with the originating
/// cause preserved as its source; there is no retry or local recovery.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Client initialization failed: {0}")]
    ClientInit(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Missing required metadata entry: key")]
    MissingKey,

    #[error("Malformed list query")]
    QueryParse(#[source] serde_json::Error),

    #[error("Error writing object")]
    Write(#[source] BoxError),

    #[error("Error reading object")]
    Read(#[source] BoxError),

    #[error("Error deleting object")]
    Delete(#[source] BoxError),

    #[error("Error listing objects")]
    List(#[source] BoxError),

    #[error("Error encoding list response")]
    ResponseEncode(#[source] serde_json::Error),
}

impl BindingError {
    pub fn write(err: impl Into<BoxError>) -> Self {
        Self::Write(err.into())
    }

    pub fn read(err: impl Into<BoxError>) -> Self {
        Self::Read(err.into())
    }

    pub fn delete(err: impl Into<BoxError>) -> Self {
        Self::Delete(err.into())
    }

    pub fn list(err: impl Into<BoxError>) -> Self {
        Self::List(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_source_is_preserved() {
        let cause = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let err = BindingError::write(cause);
        let source = err.source().expect("source");
        assert!(source.to_string().contains("connection reset"));
    }

    #[test]
    fn test_unsupported_operation_message() {
        let err = BindingError::UnsupportedOperation("compact".to_string());
        assert_eq!(err.to_string(), "Unsupported operation: compact");
    }
}
