//! Tests for the filesystem blob store

use std::path::{Path, PathBuf};

use booking_core::traits::BlobStore;
use booking_storage::{DownloadSigner, LocalBlobStore};
use uuid::Uuid;

const PUBLIC_URL: &str = "http://127.0.0.1:8000";

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("booking-storage-{}", Uuid::new_v4().simple()))
}

fn store(root: &Path) -> (LocalBlobStore, DownloadSigner) {
    let signer = DownloadSigner::new("local-store-secret", PUBLIC_URL);
    (LocalBlobStore::new(root, signer.clone()), signer)
}

#[tokio::test]
async fn test_upload_creates_nested_directories() {
    let root = scratch_dir();
    let (store, _) = store(&root);

    store
        .upload("record-1/object.pdf", b"%PDF-1.7", "application/pdf")
        .await
        .unwrap();

    let on_disk = tokio::fs::read(root.join("record-1/object.pdf")).await.unwrap();
    assert_eq!(on_disk, b"%PDF-1.7");
    assert_eq!(
        store.fetch("record-1/object.pdf").await.unwrap(),
        Some(b"%PDF-1.7".to_vec())
    );

    tokio::fs::remove_dir_all(&root).await.unwrap();
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let root = scratch_dir();
    let (store, _) = store(&root);

    store.upload("r/a.txt", b"a", "text/plain").await.unwrap();
    store.delete("r/a.txt").await.unwrap();
    store.delete("r/a.txt").await.unwrap();
    assert_eq!(store.fetch("r/a.txt").await.unwrap(), None);

    tokio::fs::remove_dir_all(&root).await.unwrap();
}

#[tokio::test]
async fn test_traversal_keys_rejected() {
    let root = scratch_dir();
    let (store, _) = store(&root);

    let err = store.upload("../escape.txt", b"x", "text/plain").await.unwrap_err();
    assert!(err.is_validation());
    let err = store.fetch("r/../../etc/passwd").await.unwrap_err();
    assert!(err.is_validation());
    assert!(!root.exists());
}

#[tokio::test]
async fn test_presigned_url_verifies_for_its_key() {
    let root = scratch_dir();
    let (store, signer) = store(&root);

    let url = store
        .presign_download_url("r/a.txt", "report.txt", 300)
        .await
        .unwrap();
    let prefix = format!("{PUBLIC_URL}/files/r/a.txt?token=");
    let token = url.strip_prefix(&prefix).unwrap();

    assert_eq!(signer.verify("r/a.txt", token).unwrap(), "report.txt");
    assert!(signer.verify("r/b.txt", token).is_err());
}
