//! Filesystem blob store
//!
//! Objects live at `{root}/{key}`. Downloads go through the server's
//! `/files` route with a signed token, so the directory itself is never
//! exposed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use booking_core::traits::{BlobStore, RepoResult};
use tracing::{debug, instrument};

use crate::error::StorageError;
use crate::key::validate_object_key;
use crate::signer::DownloadSigner;

/// Blob store writing objects under a local directory
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    signer: DownloadSigner,
}

impl LocalBlobStore {
    /// Create a store rooted at `root`; the directory is created on first upload
    pub fn new(root: impl Into<PathBuf>, signer: DownloadSigner) -> Self {
        Self {
            root: root.into(),
            signer,
        }
    }

    /// Root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_object_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> RepoResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(StorageError::from)?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(StorageError::from)?;
        debug!(path = %path.display(), "Object written");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> RepoResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    #[instrument(skip(self))]
    async fn fetch(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::from(e).into()),
        }
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
