//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AttachmentId, CommentId, QueueId, RecordId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Queue not found: {0}")]
    QueueNotFound(QueueId),

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(AttachmentId),

    #[error("Stored object not found: {0}")]
    ObjectNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0} must be a positive duration")]
    InvalidInterval(&'static str),

    #[error("Invalid object key: {0}")]
    InvalidObjectKey(String),

    #[error("File too large: max {max_bytes} bytes")]
    PayloadTooLarge { max_bytes: u64 },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the queue owner may do this")]
    NotQueueOwner,

    #[error("Only the record owner or the queue owner may do this")]
    NotRecordParticipant,

    #[error("Comment does not belong to this queue")]
    CommentQueueMismatch,

    #[error("Users may only modify their own account")]
    NotAccountOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User with this login already exists")]
    DuplicateLogin,

    #[error("User with this email already exists")]
    DuplicateEmail,

    #[error("User with this telegram login already exists")]
    DuplicateTelegramLogin,

    #[error("Queue with this name already exists")]
    DuplicateQueueName,

    #[error("Time slot is too close to an existing record")]
    TimeCollision,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::QueueNotFound(_) => "UNKNOWN_QUEUE",
            Self::RecordNotFound(_) => "UNKNOWN_RECORD",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::AttachmentNotFound(_) => "UNKNOWN_ATTACHMENT",
            Self::ObjectNotFound(_) => "UNKNOWN_OBJECT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidInterval(_) => "INVALID_INTERVAL",
            Self::InvalidObjectKey(_) => "INVALID_OBJECT_KEY",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",

            // Authorization
            Self::NotQueueOwner => "NOT_QUEUE_OWNER",
            Self::NotRecordParticipant => "NOT_RECORD_PARTICIPANT",
            Self::CommentQueueMismatch => "COMMENT_QUEUE_MISMATCH",
            Self::NotAccountOwner => "NOT_ACCOUNT_OWNER",

            // Conflict
            Self::DuplicateLogin => "DUPLICATE_LOGIN",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::DuplicateTelegramLogin => "DUPLICATE_TELEGRAM_LOGIN",
            Self::DuplicateQueueName => "DUPLICATE_QUEUE_NAME",
            Self::TimeCollision => "TIME_COLLISION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::QueueNotFound(_)
                | Self::RecordNotFound(_)
                | Self::CommentNotFound(_)
                | Self::AttachmentNotFound(_)
                | Self::ObjectNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidInterval(_) | Self::InvalidObjectKey(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotQueueOwner
                | Self::NotRecordParticipant
                | Self::CommentQueueMismatch
                | Self::NotAccountOwner
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateLogin
                | Self::DuplicateEmail
                | Self::DuplicateTelegramLogin
                | Self::DuplicateQueueName
                | Self::TimeCollision
        )
    }

    /// Check if an upload was rejected for its size
    pub fn is_payload_too_large(&self) -> bool {
        matches!(self, Self::PayloadTooLarge { .. })
    }
}
