//! Test fixtures and data generators
//!
//! Wire shapes of the booking API, kept independent of the server crates so
//! the tests exercise the JSON contract itself.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const TEST_PASSWORD: &str = "TestPass123!";

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub login: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            login: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            password: TEST_PASSWORD.to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            login: reg.login.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Body of refresh and logout
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// User profile
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub login: String,
    pub email: String,
    pub email_notifications: bool,
    pub telegram_login: Option<String>,
    pub telegram_notifications: bool,
}

/// Create queue request
#[derive(Debug, Serialize)]
pub struct CreateQueueRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_interval_secs: Option<i64>,
}

impl CreateQueueRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("queue{}", unique_suffix()),
            record_interval_secs: Some(30 * 60),
        }
    }
}

/// Queue
#[derive(Debug, Deserialize)]
pub struct QueueResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub cleanup_interval_secs: i64,
    pub record_interval_secs: i64,
}

/// Create record request
#[derive(Debug, Serialize)]
pub struct CreateRecordRequest {
    pub queue_id: String,
    pub purpose: String,
    pub meeting_datetime: DateTime<Utc>,
}

impl CreateRecordRequest {
    pub fn at(queue_id: &str, meeting_datetime: DateTime<Utc>) -> Self {
        Self {
            queue_id: queue_id.to_string(),
            purpose: "consultation".to_string(),
            meeting_datetime,
        }
    }
}

/// Record
#[derive(Debug, Deserialize)]
pub struct RecordResponse {
    pub id: String,
    pub user_id: String,
    pub queue_id: String,
    pub purpose: String,
    pub meeting_datetime: DateTime<Utc>,
    pub urgency: String,
    pub status: String,
    pub manager_comment: Option<String>,
}

/// Comment upsert request
#[derive(Debug, Serialize)]
pub struct UpsertCommentRequest {
    pub record_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
}

/// Cached comment
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub comment_id: String,
    pub queue_id: String,
    pub record_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

/// Attachment metadata
#[derive(Debug, Deserialize)]
pub struct AttachmentResponse {
    pub id: String,
    pub record_id: String,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub download_url: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
