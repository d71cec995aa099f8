//! Queue entity <-> model mapper
//!
//! Intervals are stored as whole seconds.

use booking_core::entities::Queue;
use booking_core::value_objects::{QueueId, UserId};
use chrono::Duration;

use crate::models::QueueModel;

/// Convert QueueModel to Queue entity
impl From<QueueModel> for Queue {
    fn from(model: QueueModel) -> Self {
        Queue {
            id: QueueId::from_uuid(model.id),
            name: model.name,
            owner_id: UserId::from_uuid(model.owner_id),
            cleanup_interval: Duration::seconds(model.cleanup_interval_secs),
            record_interval: Duration::seconds(model.record_interval_secs),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Interval column value for a duration
#[must_use]
pub fn duration_to_secs(duration: Duration) -> i64 {
    duration.num_seconds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_intervals_from_seconds() {
        let now = Utc::now();
        let queue = Queue::from(QueueModel {
            id: Uuid::now_v7(),
            name: "dean office".to_string(),
            owner_id: Uuid::now_v7(),
            cleanup_interval_secs: 86_400,
            record_interval_secs: 1_800,
            created_at: now,
            updated_at: now,
        });

        assert_eq!(queue.cleanup_interval, Duration::days(1));
        assert_eq!(queue.record_interval, Duration::minutes(30));
        assert_eq!(duration_to_secs(queue.record_interval), 1_800);
    }
}
