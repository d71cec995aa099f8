//! Request DTOs for API endpoints
//!
//! All JSON request DTOs implement `Deserialize` and `Validate` for input validation.

use booking_core::{CommentId, QueueId, RecordId, RecordStatus, Urgency};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Login must be 1-50 characters"))]
    pub login: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    #[serde(default)]
    pub email_notifications: bool,

    #[validate(length(min = 1, max = 64, message = "Telegram login must be 1-64 characters"))]
    pub telegram_login: Option<String>,

    #[serde(default)]
    pub telegram_notifications: bool,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Refresh and logout request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 50, message = "Login must be 1-50 characters"))]
    pub login: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub email_notifications: Option<bool>,

    #[validate(length(min = 1, max = 64, message = "Telegram login must be 1-64 characters"))]
    pub telegram_login: Option<String>,

    pub telegram_notifications: Option<bool>,
}

/// Change the account email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEmailRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub email_notifications: Option<bool>,
}

/// Link a telegram handle
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTelegramRequest {
    #[validate(length(min = 1, max = 64, message = "Telegram login must be 1-64 characters"))]
    pub telegram_login: String,

    pub telegram_notifications: Option<bool>,
}

/// Change the account password
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub new_password: String,
}

// ============================================================================
// Queue Requests
// ============================================================================

/// Create queue request; intervals default to one day and thirty minutes
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQueueRequest {
    #[validate(length(min = 1, max = 50, message = "Queue name must be 1-50 characters"))]
    pub name: String,

    #[validate(range(min = 1, message = "Cleanup interval must be positive"))]
    pub cleanup_interval_secs: Option<i64>,

    #[validate(range(min = 1, message = "Record interval must be positive"))]
    pub record_interval_secs: Option<i64>,
}

/// Partial queue update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQueueRequest {
    #[validate(length(min = 1, max = 50, message = "Queue name must be 1-50 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 1, message = "Cleanup interval must be positive"))]
    pub cleanup_interval_secs: Option<i64>,

    #[validate(range(min = 1, message = "Record interval must be positive"))]
    pub record_interval_secs: Option<i64>,
}

// ============================================================================
// Record Requests
// ============================================================================

/// Book a meeting in a queue
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRecordRequest {
    pub queue_id: QueueId,

    #[validate(length(min = 1, max = 500, message = "Purpose must be 1-500 characters"))]
    pub purpose: String,

    pub meeting_datetime: DateTime<Utc>,

    #[serde(default)]
    pub urgency: Urgency,
}

/// Partial record update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateRecordRequest {
    #[validate(length(min = 1, max = 500, message = "Purpose must be 1-500 characters"))]
    pub purpose: Option<String>,

    pub meeting_datetime: Option<DateTime<Utc>>,

    pub urgency: Option<Urgency>,

    pub status: Option<RecordStatus>,

    #[validate(length(max = 1000, message = "Manager comment must be at most 1000 characters"))]
    pub manager_comment: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Apply a comment to a record, creating it or reusing an existing one by id
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertCommentRequest {
    pub record_id: RecordId,

    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub text: String,

    pub comment_id: Option<CommentId>,
}

// ============================================================================
// Attachment Requests
// ============================================================================

/// File received from a multipart upload
#[derive(Debug, Clone)]
pub struct UploadAttachmentRequest {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
