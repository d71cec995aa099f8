//! Attachment handlers
//!
//! Uploads arrive as multipart with the file in the `file` field.

use axum::{
    extract::{Multipart, State},
    Json,
};
use booking_core::{AttachmentId, RecordId};
use booking_service::{AttachmentResponse, AttachmentService, UploadAttachmentRequest};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// Pull the `file` field out of a multipart body
async fn read_file_field(multipart: &mut Multipart) -> ApiResult<UploadAttachmentRequest> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;

        return Ok(UploadAttachmentRequest {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::invalid_body("missing multipart field \"file\""))
}

/// Upload a file to a record
///
/// POST /attachments/records/{record_id}
pub async fn upload_attachment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(record_id): IdPath<RecordId>,
    mut multipart: Multipart,
) -> ApiResult<Created<Json<AttachmentResponse>>> {
    let request = read_file_field(&mut multipart).await?;

    let service = AttachmentService::new(state.service_context());
    let response = service.upload(auth.user_id, record_id, request).await?;
    Ok(Created(Json(response)))
}

/// Attachments of a record
///
/// GET /attachments/records/{record_id}
pub async fn list_record_attachments(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(record_id): IdPath<RecordId>,
) -> ApiResult<Json<Vec<AttachmentResponse>>> {
    let service = AttachmentService::new(state.service_context());
    Ok(Json(
        service
            .list_record_attachments(auth.user_id, record_id)
            .await?,
    ))
}

/// Get an attachment with a fresh download link
///
/// GET /attachments/{attachment_id}
pub async fn get_attachment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(attachment_id): IdPath<AttachmentId>,
) -> ApiResult<Json<AttachmentResponse>> {
    let service = AttachmentService::new(state.service_context());
    Ok(Json(service.get_attachment(auth.user_id, attachment_id).await?))
}

/// Detach an attachment
///
/// DELETE /attachments/{attachment_id}
pub async fn detach_attachment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(attachment_id): IdPath<AttachmentId>,
) -> ApiResult<NoContent> {
    let service = AttachmentService::new(state.service_context());
    service.detach(auth.user_id, attachment_id).await?;
    Ok(NoContent)
}
