//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids serialize as UUID strings and intervals as whole seconds.

use booking_core::{
    AttachmentId, CommentId, QueueId, RecordId, RecordStatus, Urgency, UserId,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Auth Responses
// ============================================================================

/// Access and refresh token pair
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            msg: "ok".to_string(),
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user profile
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub email_notifications: bool,
    pub telegram_login: Option<String>,
    pub telegram_notifications: bool,
}

// ============================================================================
// Queue Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct QueueResponse {
    pub id: QueueId,
    pub name: String,
    pub owner_id: UserId,
    pub cleanup_interval_secs: i64,
    pub record_interval_secs: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Record Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RecordResponse {
    pub id: RecordId,
    pub user_id: UserId,
    pub queue_id: QueueId,
    pub purpose: String,
    pub meeting_datetime: DateTime<Utc>,
    pub urgency: Urgency,
    pub status: RecordStatus,
    pub manager_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub comment_id: CommentId,
    pub queue_id: QueueId,
    pub record_id: RecordId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

// ============================================================================
// Attachment Responses
// ============================================================================

/// Attachment metadata with a short-lived download link
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentResponse {
    pub id: AttachmentId,
    pub record_id: RecordId,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub download_url: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
