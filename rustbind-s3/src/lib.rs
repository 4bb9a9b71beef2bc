//! S3-compatible bucket output binding for RustBind
//!
//! This crate translates the vendor-neutral invoke contract into object
//! storage calls against a single bucket: create, get, delete, and list.

pub mod binding;
pub mod client;
pub mod config;

pub use binding::S3BucketBinding;
pub use client::{
    BucketClient, ListQuery, ListResult, MemoryClient, ObjectSummary, S3Client, StorageError,
    DEFAULT_MAX_KEYS,
};
pub use config::ConnectionConfig;
