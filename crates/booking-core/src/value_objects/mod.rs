//! Value objects - immutable types that represent domain concepts

mod ids;
mod time_window;

pub use ids::{
    AttachmentId, CommentId, IdParseError, QueueId, RecordId, RefreshTokenId, UserId,
};
pub use time_window::TimeWindow;
