//! Storage errors

use booking_core::DomainError;
use thiserror::Error;

/// Errors raised by the blob stores
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to sign download token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(key) => DomainError::InvalidObjectKey(key),
            other => DomainError::StorageError(other.to_string()),
        }
    }
}

/// Reasons a download token is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DownloadTokenError {
    #[error("download token is invalid")]
    Invalid,

    #[error("download token has expired")]
    Expired,

    #[error("download token was issued for another object")]
    KeyMismatch,
}
