//! Record entity <-> model mapper

use booking_core::entities::Record;
use booking_core::error::DomainError;
use booking_core::value_objects::{QueueId, RecordId, UserId};

use crate::models::RecordModel;

/// Convert RecordModel to Record entity, rejecting unknown enum values
impl TryFrom<RecordModel> for Record {
    type Error = DomainError;

    fn try_from(model: RecordModel) -> Result<Self, Self::Error> {
        Ok(Record {
            id: RecordId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            queue_id: QueueId::from_uuid(model.queue_id),
            purpose: model.purpose,
            meeting_datetime: model.meeting_datetime,
            urgency: model.urgency.parse().map_err(DomainError::DatabaseError)?,
            status: model.status.parse().map_err(DomainError::DatabaseError)?,
            manager_comment: model.manager_comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booking_core::entities::{RecordStatus, Urgency};
    use chrono::Utc;
    use uuid::Uuid;

    fn model(urgency: &str, status: &str) -> RecordModel {
        let now = Utc::now();
        RecordModel {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            queue_id: Uuid::now_v7(),
            purpose: "consultation".to_string(),
            meeting_datetime: now,
            urgency: urgency.to_string(),
            status: status.to_string(),
            manager_comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_enum_columns() {
        let record = Record::try_from(model("HIGH", "CONFIRMED")).unwrap();
        assert_eq!(record.urgency, Urgency::High);
        assert_eq!(record.status, RecordStatus::Confirmed);
    }

    #[test]
    fn test_unknown_enum_value() {
        let result = Record::try_from(model("URGENT", "PENDING"));
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }
}
