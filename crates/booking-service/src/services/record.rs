//! Booking workflow
//!
//! A record may only be scheduled when no other record of the same queue lies
//! strictly inside the queue's collision window around the requested time.
//! The check runs on create and whenever an update moves the meeting.

use booking_core::entities::{Queue, Record};
use booking_core::error::DomainError;
use booking_core::value_objects::{QueueId, RecordId, UserId};
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::dto::{CreateRecordRequest, RecordResponse, UpdateRecordRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::queue::QueueService;

/// Booking workflow service
pub struct RecordService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RecordService<'a> {
    /// Create a new RecordService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Load a record together with its queue, checking that the acting user
    /// requested the record or owns the queue
    pub(crate) async fn load_for_participant(
        &self,
        acting: UserId,
        record_id: RecordId,
    ) -> ServiceResult<(Record, Queue)> {
        let record = self
            .ctx
            .record_repo()
            .find_by_id(record_id)
            .await?
            .ok_or(DomainError::RecordNotFound(record_id))?;
        let queue = QueueService::new(self.ctx).load(record.queue_id).await?;

        if !record.is_requested_by(acting) && !queue.is_owned_by(acting) {
            return Err(DomainError::NotRecordParticipant.into());
        }
        Ok((record, queue))
    }

    async fn ensure_slot_free(
        &self,
        queue: &Queue,
        meeting: DateTime<Utc>,
        exclude: Option<RecordId>,
    ) -> ServiceResult<()> {
        let window = queue.collision_window(meeting);
        if self
            .ctx
            .record_repo()
            .has_collision(queue.id, window, exclude)
            .await?
        {
            warn!(queue_id = %queue.id, %meeting, "Booking rejected: time collision");
            return Err(DomainError::TimeCollision.into());
        }
        Ok(())
    }

    /// Book a meeting in a queue
    #[instrument(skip(self, request), fields(user_id = %requester, queue_id = %request.queue_id))]
    pub async fn create_record(
        &self,
        requester: UserId,
        request: CreateRecordRequest,
    ) -> ServiceResult<RecordResponse> {
        let queue = QueueService::new(self.ctx).load(request.queue_id).await?;
        self.ensure_slot_free(&queue, request.meeting_datetime, None)
            .await?;

        let record = Record::new(
            RecordId::new(),
            requester,
            queue.id,
            request.purpose,
            request.meeting_datetime,
            request.urgency,
        );
        self.ctx.record_repo().create(&record).await?;

        info!(record_id = %record.id, "Record created");
        Ok(record.into())
    }

    /// Get a record visible to the acting user
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn get_record(&self, acting: UserId, record_id: RecordId) -> ServiceResult<RecordResponse> {
        let (record, _) = self.load_for_participant(acting, record_id).await?;
        Ok(record.into())
    }

    /// Records of a queue, earliest meeting first
    #[instrument(skip(self))]
    pub async fn list_queue_records(&self, queue_id: QueueId) -> ServiceResult<Vec<RecordResponse>> {
        QueueService::new(self.ctx).load(queue_id).await?;
        let records = self.ctx.record_repo().find_by_queue(queue_id).await?;
        Ok(records.into_iter().map(RecordResponse::from).collect())
    }

    /// Records requested by the acting user
    #[instrument(skip(self))]
    pub async fn list_my_records(&self, acting: UserId) -> ServiceResult<Vec<RecordResponse>> {
        let records = self.ctx.record_repo().find_by_user(acting).await?;
        Ok(records.into_iter().map(RecordResponse::from).collect())
    }

    /// Apply a partial update; record owner or queue owner only
    #[instrument(skip(self, request), fields(user_id = %acting))]
    pub async fn update_record(
        &self,
        acting: UserId,
        record_id: RecordId,
        request: UpdateRecordRequest,
    ) -> ServiceResult<RecordResponse> {
        let (mut record, queue) = self.load_for_participant(acting, record_id).await?;

        if let Some(meeting) = request.meeting_datetime {
            if meeting != record.meeting_datetime {
                self.ensure_slot_free(&queue, meeting, Some(record.id))
                    .await?;
                record.set_meeting_datetime(meeting);
            }
        }
        if let Some(purpose) = request.purpose {
            record.set_purpose(purpose);
        }
        if let Some(urgency) = request.urgency {
            record.set_urgency(urgency);
        }
        if let Some(status) = request.status {
            record.set_status(status);
        }
        if let Some(comment) = request.manager_comment {
            record.set_manager_comment(Some(comment));
        }

        self.ctx.record_repo().update(&record).await?;
        info!(record_id = %record.id, status = %record.status, "Record updated");
        Ok(record.into())
    }

    /// Delete a record and its attachments; record owner or queue owner only
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn delete_record(&self, acting: UserId, record_id: RecordId) -> ServiceResult<()> {
        self.load_for_participant(acting, record_id).await?;

        let attachments = self.ctx.attachment_repo().find_by_record(record_id).await?;
        for attachment in &attachments {
            self.ctx.blob_store().delete(&attachment.object_key).await?;
        }

        self.ctx.record_repo().delete(record_id).await?;
        info!(attachments = attachments.len(), "Record deleted");
        Ok(())
    }
}
