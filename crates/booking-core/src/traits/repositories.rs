//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Deletes cascade explicitly: each `delete`
//! removes the dependent rows listed on the method inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Attachment, Comment, Queue, Record, RefreshToken, User};
use crate::error::DomainError;
use crate::value_objects::{
    AttachmentId, CommentId, QueueId, RecordId, RefreshTokenId, TimeWindow, UserId,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by login
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;

    /// List all users
    async fn find_all(&self) -> RepoResult<Vec<User>>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete a user together with their refresh tokens, their queues
    /// (records, comments, attachments included) and the records they
    /// requested in other queues
    async fn delete(&self, id: UserId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist a newly issued token
    async fn create(&self, token: &RefreshToken) -> RepoResult<()>;

    /// All tokens that are not revoked and not expired at `now`
    async fn find_active(&self, now: DateTime<Utc>) -> RepoResult<Vec<RefreshToken>>;

    /// Revoke a token if it is still active; returns false if it was already revoked
    async fn revoke(&self, id: RefreshTokenId) -> RepoResult<bool>;

    /// Revoke every active token of a user, returning how many were revoked
    async fn revoke_all_for_user(&self, user_id: UserId) -> RepoResult<u64>;
}

// ============================================================================
// Queue Repository
// ============================================================================

#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Find queue by ID
    async fn find_by_id(&self, id: QueueId) -> RepoResult<Option<Queue>>;

    /// List all queues
    async fn find_all(&self) -> RepoResult<Vec<Queue>>;

    /// List queues owned by a user
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Queue>>;

    /// Create a new queue
    async fn create(&self, queue: &Queue) -> RepoResult<()>;

    /// Update an existing queue
    async fn update(&self, queue: &Queue) -> RepoResult<()>;

    /// Delete a queue with its records, their attachments and its comments
    async fn delete(&self, id: QueueId) -> RepoResult<()>;
}

// ============================================================================
// Record Repository
// ============================================================================

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Find record by ID
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>>;

    /// List records in a queue ordered by meeting time
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Record>>;

    /// List records requested by a user ordered by meeting time
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Record>>;

    /// Check whether a record of the queue is scheduled strictly inside `window`
    async fn has_collision(
        &self,
        queue_id: QueueId,
        window: TimeWindow,
        exclude: Option<RecordId>,
    ) -> RepoResult<bool>;

    /// Create a new record
    async fn create(&self, record: &Record) -> RepoResult<()>;

    /// Update an existing record
    async fn update(&self, record: &Record) -> RepoResult<()>;

    /// Delete a record with its attachments
    async fn delete(&self, id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// List comments of a queue, oldest created first
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Comment>>;

    /// In one transaction: insert the comment, delete the queue's comments
    /// beyond the `keep` most recently created ones, and set the comment text
    /// as the manager comment of `comment.record_id`.
    ///
    /// Returns the ids of the evicted comments.
    async fn create_and_apply(&self, comment: &Comment, keep: usize)
        -> RepoResult<Vec<CommentId>>;

    /// In one transaction: store the touched comment's text and `last_used_at`
    /// and set that text as the manager comment of `record_id`
    async fn touch_and_apply(&self, comment: &Comment, record_id: RecordId) -> RepoResult<()>;
}

// ============================================================================
// Attachment Repository
// ============================================================================

#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Find attachment by ID
    async fn find_by_id(&self, id: AttachmentId) -> RepoResult<Option<Attachment>>;

    /// List attachments of a record, oldest first
    async fn find_by_record(&self, record_id: RecordId) -> RepoResult<Vec<Attachment>>;

    /// List attachments of every record in a queue
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Attachment>>;

    /// List attachments removed when the user is deleted: those of records
    /// the user requested and of records in queues the user owns
    async fn find_owned_by_user(&self, user_id: UserId) -> RepoResult<Vec<Attachment>>;

    /// Create attachment metadata
    async fn create(&self, attachment: &Attachment) -> RepoResult<()>;

    /// Delete attachment metadata
    async fn delete(&self, id: AttachmentId) -> RepoResult<()>;
}
