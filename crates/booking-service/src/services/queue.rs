//! Queue service
//!
//! Queues are public to read; only the owner may change or delete one.

use booking_core::entities::Queue;
use booking_core::error::DomainError;
use booking_core::value_objects::{QueueId, UserId};
use chrono::Duration;
use tracing::{info, instrument};

use crate::dto::{CreateQueueRequest, QueueResponse, UpdateQueueRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Queue service
pub struct QueueService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QueueService<'a> {
    /// Create a new QueueService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) async fn load(&self, queue_id: QueueId) -> ServiceResult<Queue> {
        self.ctx
            .queue_repo()
            .find_by_id(queue_id)
            .await?
            .ok_or_else(|| DomainError::QueueNotFound(queue_id).into())
    }

    /// Load a queue the acting user owns
    pub(crate) async fn load_owned(&self, acting: UserId, queue_id: QueueId) -> ServiceResult<Queue> {
        let queue = self.load(queue_id).await?;
        if !queue.is_owned_by(acting) {
            return Err(DomainError::NotQueueOwner.into());
        }
        Ok(queue)
    }

    /// Create a queue owned by the acting user
    #[instrument(skip(self, request), fields(owner_id = %owner, name = %request.name))]
    pub async fn create_queue(
        &self,
        owner: UserId,
        request: CreateQueueRequest,
    ) -> ServiceResult<QueueResponse> {
        let mut queue = Queue::new(QueueId::new(), request.name, owner);
        if let Some(secs) = request.cleanup_interval_secs {
            queue.set_cleanup_interval(interval_from_secs(secs, "cleanup_interval")?)?;
        }
        if let Some(secs) = request.record_interval_secs {
            queue.set_record_interval(interval_from_secs(secs, "record_interval")?)?;
        }

        self.ctx.queue_repo().create(&queue).await?;

        info!(queue_id = %queue.id, "Queue created");
        Ok(queue.into())
    }

    /// Get a queue by id
    #[instrument(skip(self))]
    pub async fn get_queue(&self, queue_id: QueueId) -> ServiceResult<QueueResponse> {
        self.load(queue_id).await.map(QueueResponse::from)
    }

    /// List all queues
    #[instrument(skip(self))]
    pub async fn list_queues(&self) -> ServiceResult<Vec<QueueResponse>> {
        let queues = self.ctx.queue_repo().find_all().await?;
        Ok(queues.into_iter().map(QueueResponse::from).collect())
    }

    /// List the queues owned by a user
    #[instrument(skip(self))]
    pub async fn list_by_owner(&self, owner: UserId) -> ServiceResult<Vec<QueueResponse>> {
        let queues = self.ctx.queue_repo().find_by_owner(owner).await?;
        Ok(queues.into_iter().map(QueueResponse::from).collect())
    }

    /// Apply a partial update; owner only
    #[instrument(skip(self, request), fields(user_id = %acting))]
    pub async fn update_queue(
        &self,
        acting: UserId,
        queue_id: QueueId,
        request: UpdateQueueRequest,
    ) -> ServiceResult<QueueResponse> {
        let mut queue = self.load_owned(acting, queue_id).await?;

        if let Some(name) = request.name {
            queue.set_name(name);
        }
        if let Some(secs) = request.cleanup_interval_secs {
            queue.set_cleanup_interval(interval_from_secs(secs, "cleanup_interval")?)?;
        }
        if let Some(secs) = request.record_interval_secs {
            queue.set_record_interval(interval_from_secs(secs, "record_interval")?)?;
        }

        self.ctx.queue_repo().update(&queue).await?;
        info!("Queue updated");
        Ok(queue.into())
    }

    /// Delete a queue with its records, comments and attachments; owner only
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn delete_queue(&self, acting: UserId, queue_id: QueueId) -> ServiceResult<()> {
        self.load_owned(acting, queue_id).await?;

        let attachments = self.ctx.attachment_repo().find_by_queue(queue_id).await?;
        for attachment in &attachments {
            self.ctx.blob_store().delete(&attachment.object_key).await?;
        }

        self.ctx.queue_repo().delete(queue_id).await?;
        info!(attachments = attachments.len(), "Queue deleted");
        Ok(())
    }
}

/// Longest accepted interval (ten years), keeping collision windows in range
const MAX_INTERVAL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Convert wire seconds into a duration the entity can validate
fn interval_from_secs(secs: i64, field: &'static str) -> Result<Duration, DomainError> {
    if secs > MAX_INTERVAL_SECS {
        return Err(DomainError::InvalidInterval(field));
    }
    Duration::try_seconds(secs).ok_or(DomainError::InvalidInterval(field))
}
