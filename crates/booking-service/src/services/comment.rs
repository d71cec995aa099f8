//! Comment cache workflow
//!
//! Queue owners keep a short list of canned comments per queue. Applying new
//! text creates a comment and evicts the oldest-created ones beyond
//! [`MAX_QUEUE_COMMENTS`]; applying an existing comment by id only refreshes
//! its text and `last_used_at`. Either way the text lands on the record.

use booking_core::entities::{Comment, MAX_QUEUE_COMMENTS};
use booking_core::error::DomainError;
use booking_core::value_objects::{CommentId, QueueId, UserId};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, UpsertCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::queue::QueueService;

/// Comment cache service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Apply a comment to a record; queue owner only
    #[instrument(
        skip(self, request),
        fields(user_id = %acting, record_id = %request.record_id, reuse = request.comment_id.is_some())
    )]
    pub async fn upsert_comment(
        &self,
        acting: UserId,
        request: UpsertCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let record = self
            .ctx
            .record_repo()
            .find_by_id(request.record_id)
            .await?
            .ok_or(DomainError::RecordNotFound(request.record_id))?;
        let queue = QueueService::new(self.ctx)
            .load_owned(acting, record.queue_id)
            .await?;

        let comment = match request.comment_id {
            None => {
                let comment =
                    Comment::new(CommentId::new(), queue.id, record.id, request.text);
                let evicted = self
                    .ctx
                    .comment_repo()
                    .create_and_apply(&comment, MAX_QUEUE_COMMENTS)
                    .await?;
                info!(comment_id = %comment.id, evicted = evicted.len(), "Comment created");
                comment
            }
            Some(comment_id) => {
                let mut comment = self
                    .ctx
                    .comment_repo()
                    .find_by_id(comment_id)
                    .await?
                    .ok_or(DomainError::CommentNotFound(comment_id))?;
                if !comment.belongs_to(queue.id) {
                    return Err(DomainError::CommentQueueMismatch.into());
                }
                comment.touch(request.text);
                self.ctx
                    .comment_repo()
                    .touch_and_apply(&comment, record.id)
                    .await?;
                info!(comment_id = %comment.id, "Comment reused");
                comment
            }
        };

        Ok(comment.into())
    }

    /// Comments of a queue, oldest created first; queue owner only
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn list_queue_comments(
        &self,
        acting: UserId,
        queue_id: QueueId,
    ) -> ServiceResult<Vec<CommentResponse>> {
        QueueService::new(self.ctx)
            .load_owned(acting, queue_id)
            .await?;
        let comments = self.ctx.comment_repo().find_by_queue(queue_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }
}
