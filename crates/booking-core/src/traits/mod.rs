//! Traits (ports) implemented by the infrastructure crates

mod repositories;
mod storage;

pub use repositories::{
    AttachmentRepository, CommentRepository, QueueRepository, RecordRepository,
    RefreshTokenRepository, RepoResult, UserRepository,
};
pub use storage::BlobStore;
