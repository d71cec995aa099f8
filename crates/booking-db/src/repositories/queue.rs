//! PostgreSQL implementation of QueueRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use booking_core::entities::Queue;
use booking_core::error::DomainError;
use booking_core::traits::{QueueRepository, RepoResult};
use booking_core::value_objects::{QueueId, UserId};

use crate::mappers::duration_to_secs;
use crate::models::QueueModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of QueueRepository
#[derive(Clone)]
pub struct PgQueueRepository {
    pool: PgPool,
}

impl PgQueueRepository {
    /// Create a new PgQueueRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for PgQueueRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: QueueId) -> RepoResult<Option<Queue>> {
        let result = sqlx::query_as::<_, QueueModel>(
            r"
            SELECT id, name, owner_id, cleanup_interval_secs, record_interval_secs,
                   created_at, updated_at
            FROM queues
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Queue::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Queue>> {
        let results = sqlx::query_as::<_, QueueModel>(
            r"
            SELECT id, name, owner_id, cleanup_interval_secs, record_interval_secs,
                   created_at, updated_at
            FROM queues
            ORDER BY created_at, id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Queue::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<Queue>> {
        let results = sqlx::query_as::<_, QueueModel>(
            r"
            SELECT id, name, owner_id, cleanup_interval_secs, record_interval_secs,
                   created_at, updated_at
            FROM queues
            WHERE owner_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(owner_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Queue::from).collect())
    }

    #[instrument(skip(self), fields(queue_id = %queue.id))]
    async fn create(&self, queue: &Queue) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO queues (id, name, owner_id, cleanup_interval_secs, record_interval_secs,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(queue.id.into_inner())
        .bind(&queue.name)
        .bind(queue.owner_id.into_inner())
        .bind(duration_to_secs(queue.cleanup_interval))
        .bind(duration_to_secs(queue.record_interval))
        .bind(queue.created_at)
        .bind(queue.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    #[instrument(skip(self), fields(queue_id = %queue.id))]
    async fn update(&self, queue: &Queue) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE queues
            SET name = $2, cleanup_interval_secs = $3, record_interval_secs = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(queue.id.into_inner())
        .bind(&queue.name)
        .bind(duration_to_secs(queue.cleanup_interval))
        .bind(duration_to_secs(queue.record_interval))
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::QueueNotFound(queue.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: QueueId) -> RepoResult<()> {
        let qid = id.into_inner();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            "DELETE FROM attachments WHERE record_id IN (SELECT id FROM records WHERE queue_id = $1)",
        )
        .bind(qid)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("DELETE FROM records WHERE queue_id = $1")
            .bind(qid)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query("DELETE FROM comments WHERE queue_id = $1")
            .bind(qid)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM queues WHERE id = $1")
            .bind(qid)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::QueueNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
