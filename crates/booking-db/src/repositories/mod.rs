//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in booking-core.
//! Each repository handles database operations for a specific domain entity.

mod attachment;
mod comment;
mod error;
mod queue;
mod record;
mod refresh_token;
mod user;

pub use attachment::PgAttachmentRepository;
pub use comment::PgCommentRepository;
pub use queue::PgQueueRepository;
pub use record::PgRecordRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;
