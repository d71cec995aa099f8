//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: Uuid,
    pub queue_id: Uuid,
    pub record_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}
