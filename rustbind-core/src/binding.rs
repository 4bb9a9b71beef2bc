//! The output-binding contract

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::envelope::{InvokeRequest, InvokeResponse, Metadata};
use crate::error::BindingError;

/// The operations an output binding may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Create,
    Get,
    Delete,
    List,
}

impl OperationKind {
    /// Wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Get => "get",
            Self::Delete => "delete",
            Self::List => "list",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "get" => Ok(Self::Get),
            "delete" => Ok(Self::Delete),
            "list" => Ok(Self::List),
            other => Err(BindingError::UnsupportedOperation(other.to_string())),
        }
    }
}

/// An adapter the host runtime invokes to reach an external system.
///
/// `init` is called exactly once before any `invoke`. After that the
/// binding holds only read-only state, so concurrent invocations are
/// independent.
#[async_trait]
pub trait OutputBinding: Send + Sync {
    /// Parse the component properties and establish the client handle.
    async fn init(&mut self, metadata: Metadata) -> Result<(), BindingError>;

    /// The operations this binding supports.
    fn operations(&self) -> Vec<OperationKind>;

    /// Perform one operation. Errors surface synchronously; no partial
    /// responses are produced on error.
    async fn invoke(&self, req: InvokeRequest) -> Result<InvokeResponse, BindingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind_round_trip() {
        for op in [
            OperationKind::Create,
            OperationKind::Get,
            OperationKind::Delete,
            OperationKind::List,
        ] {
            assert_eq!(op.as_str().parse::<OperationKind>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation_carries_name() {
        let err = "compact".parse::<OperationKind>().unwrap_err();
        match err {
            BindingError::UnsupportedOperation(name) => assert_eq!(name, "compact"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_operation_names_are_lower_case() {
        // Wire names are case-sensitive
        assert!("Create".parse::<OperationKind>().is_err());
        assert!("LIST".parse::<OperationKind>().is_err());
    }
}
