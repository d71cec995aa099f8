//! Blob store port for attachment contents

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Opaque binary object store
///
/// Object keys are produced by [`crate::Attachment::object_key_for`].
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write an object, replacing any existing one under the same key
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> RepoResult<()>;

    /// Remove an object; removing a missing object succeeds
    async fn delete(&self, key: &str) -> RepoResult<()>;

    /// Read an object back
    async fn fetch(&self, key: &str) -> RepoResult<Option<Vec<u8>>>;

    /// Build a time-limited download URL that serves the object as `filename`
    async fn presign_download_url(
        &self,
        key: &str,
        filename: &str,
        ttl_seconds: u64,
    ) -> RepoResult<String>;
}
