//! Attachment entity <-> model mapper

use booking_core::entities::Attachment;
use booking_core::value_objects::{AttachmentId, RecordId};

use crate::models::AttachmentModel;

impl From<AttachmentModel> for Attachment {
    fn from(model: AttachmentModel) -> Self {
        Attachment {
            id: AttachmentId::from_uuid(model.id),
            record_id: RecordId::from_uuid(model.record_id),
            object_key: model.object_key,
            original_filename: model.original_filename,
            content_type: model.content_type,
            size_bytes: model.size_bytes,
            created_at: model.created_at,
        }
    }
}
