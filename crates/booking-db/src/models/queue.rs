//! Queue database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for queues table
#[derive(Debug, Clone, FromRow)]
pub struct QueueModel {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub cleanup_interval_secs: i64,
    pub record_interval_secs: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
