//! Record database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for records table
///
/// `urgency` and `status` hold the upper-case enum names.
#[derive(Debug, Clone, FromRow)]
pub struct RecordModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub queue_id: Uuid,
    pub purpose: String,
    pub meeting_datetime: DateTime<Utc>,
    pub urgency: String,
    pub status: String,
    pub manager_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
