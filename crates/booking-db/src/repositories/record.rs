//! PostgreSQL implementation of RecordRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use booking_core::entities::Record;
use booking_core::error::DomainError;
use booking_core::traits::{RecordRepository, RepoResult};
use booking_core::value_objects::{QueueId, RecordId, TimeWindow, UserId};

use crate::models::RecordModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RecordRepository
#[derive(Clone)]
pub struct PgRecordRepository {
    pool: PgPool,
}

impl PgRecordRepository {
    /// Create a new PgRecordRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_records(models: Vec<RecordModel>) -> RepoResult<Vec<Record>> {
    models.into_iter().map(Record::try_from).collect()
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>> {
        let result = sqlx::query_as::<_, RecordModel>(
            r"
            SELECT id, user_id, queue_id, purpose, meeting_datetime, urgency, status,
                   manager_comment, created_at, updated_at
            FROM records
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Record::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_queue(&self, queue_id: QueueId) -> RepoResult<Vec<Record>> {
        let results = sqlx::query_as::<_, RecordModel>(
            r"
            SELECT id, user_id, queue_id, purpose, meeting_datetime, urgency, status,
                   manager_comment, created_at, updated_at
            FROM records
            WHERE queue_id = $1
            ORDER BY meeting_datetime, id
            ",
        )
        .bind(queue_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_records(results)
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Vec<Record>> {
        let results = sqlx::query_as::<_, RecordModel>(
            r"
            SELECT id, user_id, queue_id, purpose, meeting_datetime, urgency, status,
                   manager_comment, created_at, updated_at
            FROM records
            WHERE user_id = $1
            ORDER BY meeting_datetime, id
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_records(results)
    }

    #[instrument(skip(self))]
    async fn has_collision(
        &self,
        queue_id: QueueId,
        window: TimeWindow,
        exclude: Option<RecordId>,
    ) -> RepoResult<bool> {
        // Open interval: a record exactly on a bound does not collide
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM records
                WHERE queue_id = $1
                  AND meeting_datetime > $2
                  AND meeting_datetime < $3
                  AND ($4::UUID IS NULL OR id <> $4)
            )
            ",
        )
        .bind(queue_id.into_inner())
        .bind(window.start)
        .bind(window.end)
        .bind(exclude.map(RecordId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self), fields(record_id = %record.id, queue_id = %record.queue_id))]
    async fn create(&self, record: &Record) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO records (id, user_id, queue_id, purpose, meeting_datetime, urgency, status,
                                 manager_comment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(record.id.into_inner())
        .bind(record.user_id.into_inner())
        .bind(record.queue_id.into_inner())
        .bind(&record.purpose)
        .bind(record.meeting_datetime)
        .bind(record.urgency.as_str())
        .bind(record.status.as_str())
        .bind(&record.manager_comment)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(record_id = %record.id))]
    async fn update(&self, record: &Record) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE records
            SET purpose = $2, meeting_datetime = $3, urgency = $4, status = $5,
                manager_comment = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(record.id.into_inner())
        .bind(&record.purpose)
        .bind(record.meeting_datetime)
        .bind(record.urgency.as_str())
        .bind(record.status.as_str())
        .bind(&record.manager_comment)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecordNotFound(record.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RecordId) -> RepoResult<()> {
        let rid = id.into_inner();
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM attachments WHERE record_id = $1")
            .bind(rid)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(rid)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecordNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }
}
