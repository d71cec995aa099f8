//! In-memory blob store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use booking_core::traits::{BlobStore, RepoResult};
use parking_lot::RwLock;
use tracing::instrument;

use crate::key::validate_object_key;
use crate::signer::DownloadSigner;

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// Process-local blob store
///
/// Presigned URLs use the same signer as [`crate::LocalBlobStore`], so a
/// memory-backed server serves downloads the same way.
#[derive(Debug, Clone)]
pub struct MemoryBlobStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    signer: DownloadSigner,
}

impl MemoryBlobStore {
    pub fn new(signer: DownloadSigner) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            signer,
        }
    }

    /// Check whether an object is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Content type recorded at upload
    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.read().get(key).map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> RepoResult<()> {
        validate_object_key(key)?;
        self.objects.write().insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> RepoResult<()> {
        validate_object_key(key)?;
        self.objects.write().remove(key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        validate_object_key(key)?;
        Ok(self.objects.read().get(key).map(|o| o.bytes.clone()))
    }

    #[instrument(skip(self))]
    async fn presign_download_url(
        &self,
        key: &str,
        filename: &str,
        ttl_seconds: u64,
    ) -> RepoResult<String> {
        validate_object_key(key)?;
        Ok(self.signer.presign(key, filename, ttl_seconds)?)
    }
}
