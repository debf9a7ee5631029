use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;

mod fs;
mod memory;

pub use fs::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Key/value storage for opaque string blobs.
///
/// This is the only I/O boundary of Wordbank. Values are compressed by the
/// repositories before they reach a backend, so implementations store them
/// verbatim.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Retrieve the blob stored under `key`, if any
    async fn get_blob(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Store `value` under `key`, replacing any previous blob
    async fn set_blob(&self, key: &str, value: String) -> Result<(), StoreError>;
    /// Remove the blob under `key`; returns whether one existed
    async fn remove_blob(&self, key: &str) -> Result<bool, StoreError>;
    /// All keys starting with `prefix`, sorted
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
impl<T> BlobStore for Arc<T>
where
    T: BlobStore + ?Sized,
{
    async fn get_blob(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.as_ref().get_blob(key).await
    }

    async fn set_blob(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.as_ref().set_blob(key, value).await
    }

    async fn remove_blob(&self, key: &str) -> Result<bool, StoreError> {
        self.as_ref().remove_blob(key).await
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        self.as_ref().keys(prefix).await
    }
}
