//! Comment entity - a reusable canned manager response scoped to a queue
//!
//! A queue retains at most [`MAX_QUEUE_COMMENTS`] comments. Creating one more
//! evicts the comments with the oldest `created_at`; reusing a comment only
//! refreshes `last_used_at` and never affects which comments are evicted.

use chrono::{DateTime, Utc};

use crate::value_objects::{CommentId, QueueId, RecordId};

/// Number of comments retained per queue
pub const MAX_QUEUE_COMMENTS: usize = 5;

/// Canned comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub queue_id: QueueId,
    /// Record the comment was first applied to
    pub record_id: RecordId,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment, created and used now
    #[must_use]
    pub fn new(id: CommentId, queue_id: QueueId, record_id: RecordId, text: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            queue_id,
            record_id,
            text,
            created_at: now,
            last_used_at: now,
        }
    }

    /// Check if the comment belongs to the given queue
    #[inline]
    #[must_use]
    pub fn belongs_to(&self, queue_id: QueueId) -> bool {
        self.queue_id == queue_id
    }

    /// Reuse the comment: replace the text and refresh `last_used_at`
    pub fn touch(&mut self, text: String) {
        self.text = text;
        self.last_used_at = Utc::now();
    }
}

/// Select the comments that fall outside the `keep` most recently created ones
///
/// Ties on `created_at` are broken by id. The result is ordered oldest first.
#[must_use]
pub fn comments_to_evict(comments: &[Comment], keep: usize) -> Vec<CommentId> {
    let mut ordered: Vec<&Comment> = comments.iter().collect();
    ordered.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

    let overflow = ordered.len().saturating_sub(keep);
    ordered.into_iter().take(overflow).map(|c| c.id).collect()
}
