//! Comment entity <-> model mapper

use booking_core::entities::Comment;
use booking_core::value_objects::{CommentId, QueueId, RecordId};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::from_uuid(model.id),
            queue_id: QueueId::from_uuid(model.queue_id),
            record_id: RecordId::from_uuid(model.record_id),
            text: model.text,
            created_at: model.created_at,
            last_used_at: model.last_used_at,
        }
    }
}
