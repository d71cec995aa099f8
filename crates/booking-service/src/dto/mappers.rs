//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use booking_common::TokenPair;
use booking_core::entities::{Attachment, Comment, Queue, Record, User};

use super::responses::{
    AttachmentResponse, CommentResponse, QueueResponse, RecordResponse, TokenResponse,
    UserResponse,
};

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            email: user.email.clone(),
            email_notifications: user.email_notifications,
            telegram_login: user.telegram_login.clone(),
            telegram_notifications: user.telegram_notifications,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Queue Mappers
// ============================================================================

impl From<&Queue> for QueueResponse {
    fn from(queue: &Queue) -> Self {
        Self {
            id: queue.id,
            name: queue.name.clone(),
            owner_id: queue.owner_id,
            cleanup_interval_secs: queue.cleanup_interval.num_seconds(),
            record_interval_secs: queue.record_interval.num_seconds(),
            created_at: queue.created_at,
            updated_at: queue.updated_at,
        }
    }
}

impl From<Queue> for QueueResponse {
    fn from(queue: Queue) -> Self {
        Self::from(&queue)
    }
}

// ============================================================================
// Record Mappers
// ============================================================================

impl From<Record> for RecordResponse {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            queue_id: record.queue_id,
            purpose: record.purpose,
            meeting_datetime: record.meeting_datetime,
            urgency: record.urgency,
            status: record.status,
            manager_comment: record.manager_comment,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.id,
            queue_id: comment.queue_id,
            record_id: comment.record_id,
            text: comment.text,
            created_at: comment.created_at,
            last_used_at: comment.last_used_at,
        }
    }
}

// ============================================================================
// Attachment Mappers
// ============================================================================

impl AttachmentResponse {
    /// Combine stored metadata with a freshly presigned URL
    pub fn with_url(attachment: Attachment, download_url: String) -> Self {
        Self {
            id: attachment.id,
            record_id: attachment.record_id,
            original_filename: attachment.original_filename,
            content_type: attachment.content_type,
            size_bytes: attachment.size_bytes,
            download_url,
            created_at: attachment.created_at,
        }
    }
}
