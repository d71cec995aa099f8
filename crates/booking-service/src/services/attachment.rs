//! Attachment workflow
//!
//! Uploads write the blob before the row and detaches delete the blob before
//! the row, so a row never points at a missing object. A failed row insert
//! removes the fresh blob on a best-effort basis.

use booking_core::entities::Attachment;
use booking_core::error::DomainError;
use booking_core::value_objects::{AttachmentId, RecordId, UserId};
use tracing::{info, instrument, warn};

use crate::dto::{AttachmentResponse, UploadAttachmentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::record::RecordService;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Attachment service
pub struct AttachmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AttachmentService<'a> {
    /// Create a new AttachmentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn with_url(&self, attachment: Attachment) -> ServiceResult<AttachmentResponse> {
        let url = self
            .ctx
            .blob_store()
            .presign_download_url(
                &attachment.object_key,
                &attachment.original_filename,
                self.ctx.settings().download_url_ttl,
            )
            .await?;
        Ok(AttachmentResponse::with_url(attachment, url))
    }

    async fn load(&self, attachment_id: AttachmentId) -> ServiceResult<Attachment> {
        self.ctx
            .attachment_repo()
            .find_by_id(attachment_id)
            .await?
            .ok_or_else(|| DomainError::AttachmentNotFound(attachment_id).into())
    }

    /// Store a file against a record; record owner or queue owner only
    #[instrument(
        skip(self, request),
        fields(user_id = %acting, filename = %request.filename, size = request.bytes.len())
    )]
    pub async fn upload(
        &self,
        acting: UserId,
        record_id: RecordId,
        request: UploadAttachmentRequest,
    ) -> ServiceResult<AttachmentResponse> {
        RecordService::new(self.ctx)
            .load_for_participant(acting, record_id)
            .await?;

        let max_bytes = self.ctx.settings().max_upload_bytes;
        if request.bytes.len() as u64 > max_bytes {
            return Err(DomainError::PayloadTooLarge { max_bytes }.into());
        }
        if request.filename.trim().is_empty() {
            return Err(DomainError::ValidationError("filename is required".to_string()).into());
        }

        let content_type = if request.content_type.is_empty() {
            DEFAULT_CONTENT_TYPE.to_string()
        } else {
            request.content_type
        };
        let object_key = Attachment::object_key_for(record_id, &request.filename);

        self.ctx
            .blob_store()
            .upload(&object_key, &request.bytes, &content_type)
            .await?;

        let attachment = Attachment::new(
            AttachmentId::new(),
            record_id,
            object_key,
            request.filename,
            content_type,
            request.bytes.len() as i64,
        );

        if let Err(e) = self.ctx.attachment_repo().create(&attachment).await {
            if let Err(cleanup) = self.ctx.blob_store().delete(&attachment.object_key).await {
                warn!(key = %attachment.object_key, error = %cleanup, "Orphaned blob left behind");
            }
            return Err(e.into());
        }

        info!(attachment_id = %attachment.id, "Attachment uploaded");
        self.with_url(attachment).await
    }

    /// Attachments of a record with download links
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn list_record_attachments(
        &self,
        acting: UserId,
        record_id: RecordId,
    ) -> ServiceResult<Vec<AttachmentResponse>> {
        RecordService::new(self.ctx)
            .load_for_participant(acting, record_id)
            .await?;

        let attachments = self.ctx.attachment_repo().find_by_record(record_id).await?;
        let mut responses = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            responses.push(self.with_url(attachment).await?);
        }
        Ok(responses)
    }

    /// One attachment with a download link
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn get_attachment(
        &self,
        acting: UserId,
        attachment_id: AttachmentId,
    ) -> ServiceResult<AttachmentResponse> {
        let attachment = self.load(attachment_id).await?;
        RecordService::new(self.ctx)
            .load_for_participant(acting, attachment.record_id)
            .await?;
        self.with_url(attachment).await
    }

    /// Remove an attachment: blob first, then the row
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn detach(&self, acting: UserId, attachment_id: AttachmentId) -> ServiceResult<()> {
        let attachment = self.load(attachment_id).await?;
        RecordService::new(self.ctx)
            .load_for_participant(acting, attachment.record_id)
            .await?;

        self.ctx.blob_store().delete(&attachment.object_key).await?;
        self.ctx.attachment_repo().delete(attachment.id).await?;

        info!(attachment_id = %attachment.id, "Attachment detached");
        Ok(())
    }
}
