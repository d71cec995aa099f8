//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attachment;
mod comment;
mod queue;
mod record;
mod refresh_token;
mod user;

pub use attachment::AttachmentModel;
pub use comment::CommentModel;
pub use queue::QueueModel;
pub use record::RecordModel;
pub use refresh_token::RefreshTokenModel;
pub use user::UserModel;
