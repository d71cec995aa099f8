//! # booking-storage
//!
//! Blob storage for attachment contents.
//!
//! ## Features
//!
//! - **Local Store**: Objects written under an upload directory with tokio fs
//! - **Memory Store**: Process-local store for tests and memory-backed servers
//! - **Download Signing**: Short-lived signed tokens bound to one object key
//!
//! ## Example
//!
//! ```ignore
//! use booking_storage::{DownloadSigner, LocalBlobStore};
//!
//! let signer = DownloadSigner::new(&config.jwt.secret, &config.storage.public_url);
//! let store = LocalBlobStore::new(&config.storage.upload_dir, signer.clone());
//!
//! store.upload(&key, &bytes, "application/pdf").await?;
//! let url = store.presign_download_url(&key, "scan.pdf", 3600).await?;
//!
//! // Later, in the download handler
//! let filename = signer.verify(&key, &token)?;
//! ```

pub mod error;
mod key;
pub mod local;
pub mod memory;
pub mod signer;

pub use error::{DownloadTokenError, StorageError};
pub use key::validate_object_key;
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;
pub use signer::{DownloadClaims, DownloadSigner, DOWNLOAD_AUDIENCE};
