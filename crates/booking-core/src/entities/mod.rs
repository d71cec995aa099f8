//! Domain entities - core business objects

mod attachment;
mod comment;
mod queue;
mod record;
mod refresh_token;
mod user;

pub use attachment::Attachment;
pub use comment::{comments_to_evict, Comment, MAX_QUEUE_COMMENTS};
pub use queue::Queue;
pub use record::{Record, RecordStatus, Urgency};
pub use refresh_token::RefreshToken;
pub use user::User;
