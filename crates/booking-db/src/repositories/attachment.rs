//! PostgreSQL implementation of AttachmentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use booking_core::entities::Attachment;
use booking_core::error::DomainError;
use booking_core::traits::{AttachmentRepository, RepoResult};
use booking_core::value_objects::{AttachmentId, QueueId, RecordId, UserId};

use crate::models::AttachmentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AttachmentRepository
#[derive(Clone)]
pub struct PgAttachmentRepository {
    pool: PgPool,
}

impl PgAttachmentRepository {
    /// Create a new PgAttachmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttachmentRepository for PgAttachmentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: AttachmentId) -> RepoResult<Option<Attachment>> {
        let result = sqlx::query_as::<_, AttachmentModel>(
            r"
            SELECT id, record_id, object_key, original_filename, content_type, size_bytes, created_at
            FROM attachments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Attachment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_record(&self, record_id: RecordId) -> RepoResult<Vec<Attachment>> {
        let results = sqlx::query_as::<_, AttachmentModel>(
            r"
            SELECT id, record_id, object_key, original_filename, content_type, size_bytes, created_at
            FROM attachments
            WHERE record_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(record_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Attachment::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Attachment>> {
        let results = sqlx::query_as::<_, AttachmentModel>(
            r"
            SELECT a.id, a.record_id, a.object_key, a.original_filename, a.content_type,
                   a.size_bytes, a.created_at
            FROM attachments a
            JOIN records r ON r.id = a.record_id
            WHERE r.queue_id = $1
            ORDER BY a.created_at, a.id
            ",
        )
        .bind(queue_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Attachment::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_owned_by_user(&self, user_id: UserId) -> RepoResult<Vec<Attachment>> {
        let results = sqlx::query_as::<_, AttachmentModel>(
            r"
            SELECT a.id, a.record_id, a.object_key, a.original_filename, a.content_type,
                   a.size_bytes, a.created_at
            FROM attachments a
            JOIN records r ON r.id = a.record_id
            WHERE r.user_id = $1
               OR r.queue_id IN (SELECT id FROM queues WHERE owner_id = $1)
            ORDER BY a.created_at, a.id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Attachment::from).collect())
    }

    #[instrument(skip(self), fields(attachment_id = %attachment.id, record_id = %attachment.record_id))]
    async fn create(&self, attachment: &Attachment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO attachments (id, record_id, object_key, original_filename, content_type,
                                     size_bytes, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(attachment.id.into_inner())
        .bind(attachment.record_id.into_inner())
        .bind(&attachment.object_key)
        .bind(&attachment.original_filename)
        .bind(&attachment.content_type)
        .bind(attachment.size_bytes)
        .bind(attachment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AttachmentId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AttachmentNotFound(id));
        }

        Ok(())
    }
}
