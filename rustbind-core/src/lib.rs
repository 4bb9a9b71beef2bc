//! Core types and traits for RustBind
//!
//! This crate defines the vendor-neutral contract between a component
//! runtime and its output bindings: the invocation envelope, the
//! operation set, and the error taxonomy shared by all adapters.

pub mod binding;
pub mod envelope;
pub mod error;

pub use binding::{OperationKind, OutputBinding};
pub use envelope::{InvokeRequest, InvokeResponse, Metadata};
pub use error::{BindingError, BoxError};
