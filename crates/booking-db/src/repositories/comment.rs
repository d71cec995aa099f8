//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use booking_core::entities::Comment;
use booking_core::error::DomainError;
use booking_core::traits::{CommentRepository, RepoResult};
use booking_core::value_objects::{CommentId, QueueId, RecordId};

use crate::models::CommentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Set the manager comment of a record inside an open transaction
async fn apply_to_record(
    tx: &mut Transaction<'_, Postgres>,
    record_id: RecordId,
    text: &str,
) -> RepoResult<()> {
    let result = sqlx::query(
        r"
        UPDATE records
        SET manager_comment = $2, updated_at = NOW()
        WHERE id = $1
        ",
    )
    .bind(record_id.into_inner())
    .bind(text)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() == 0 {
        return Err(DomainError::RecordNotFound(record_id));
    }

    Ok(())
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, queue_id, record_id, text, created_at, last_used_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, queue_id, record_id, text, created_at, last_used_at
            FROM comments
            WHERE queue_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(queue_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, queue_id = %comment.queue_id))]
    async fn create_and_apply(
        &self,
        comment: &Comment,
        keep: usize,
    ) -> RepoResult<Vec<CommentId>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO comments (id, queue_id, record_id, text, created_at, last_used_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.queue_id.into_inner())
        .bind(comment.record_id.into_inner())
        .bind(&comment.text)
        .bind(comment.created_at)
        .bind(comment.last_used_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // Everything past the `keep` most recently created comments goes
        let evicted = sqlx::query_scalar::<_, Uuid>(
            r"
            DELETE FROM comments
            WHERE id IN (
                SELECT id FROM comments
                WHERE queue_id = $1
                ORDER BY created_at DESC, id DESC
                OFFSET $2
            )
            RETURNING id
            ",
        )
        .bind(comment.queue_id.into_inner())
        .bind(i64::try_from(keep).unwrap_or(i64::MAX))
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        apply_to_record(&mut tx, comment.record_id, &comment.text).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(evicted.into_iter().map(CommentId::from_uuid).collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn touch_and_apply(&self, comment: &Comment, record_id: RecordId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE comments
            SET text = $2, last_used_at = $3
            WHERE id = $1
            ",
        )
        .bind(comment.id.into_inner())
        .bind(&comment.text)
        .bind(comment.last_used_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(comment.id));
        }

        apply_to_record(&mut tx, record_id, &comment.text).await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
