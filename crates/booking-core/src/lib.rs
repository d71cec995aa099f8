//! # booking-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! pure booking rules (collision windows, comment retention, object keys).
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    comments_to_evict, Attachment, Comment, Queue, Record, RecordStatus, RefreshToken, Urgency,
    User, MAX_QUEUE_COMMENTS,
};
pub use error::DomainError;
pub use traits::{
    AttachmentRepository, BlobStore, CommentRepository, QueueRepository, RecordRepository,
    RefreshTokenRepository, RepoResult, UserRepository,
};
pub use value_objects::{
    AttachmentId, CommentId, IdParseError, QueueId, RecordId, RefreshTokenId, TimeWindow, UserId,
};
