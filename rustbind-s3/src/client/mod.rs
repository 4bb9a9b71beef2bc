//! Bucket client abstraction and backends

mod memory;
mod s3;
mod traits;


pub use memory::MemoryClient;
pub use s3::S3Client;
pub use traits::{
    BucketClient, ListQuery, ListResult, ObjectSummary, StorageError, DEFAULT_MAX_KEYS,
};
