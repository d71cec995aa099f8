//! Record (booking) handlers

use axum::{extract::State, Json};
use booking_core::{QueueId, RecordId};
use booking_service::{CreateRecordRequest, RecordResponse, RecordService, UpdateRecordRequest};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Book a meeting
///
/// POST /records
pub async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateRecordRequest>,
) -> ApiResult<Created<Json<RecordResponse>>> {
    let service = RecordService::new(state.service_context());
    let response = service.create_record(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Records requested by the caller
///
/// GET /records/me
pub async fn list_my_records(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<RecordResponse>>> {
    let service = RecordService::new(state.service_context());
    Ok(Json(service.list_my_records(auth.user_id).await?))
}

/// Records of a queue, earliest meeting first
///
/// GET /records/queue/{queue_id}
pub async fn list_queue_records(
    State(state): State<AppState>,
    IdPath(queue_id): IdPath<QueueId>,
) -> ApiResult<Json<Vec<RecordResponse>>> {
    let service = RecordService::new(state.service_context());
    Ok(Json(service.list_queue_records(queue_id).await?))
}

/// Get a record
///
/// GET /records/{record_id}
pub async fn get_record(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(record_id): IdPath<RecordId>,
) -> ApiResult<Json<RecordResponse>> {
    let service = RecordService::new(state.service_context());
    Ok(Json(service.get_record(auth.user_id, record_id).await?))
}

/// Update a record
///
/// PATCH /records/{record_id}
pub async fn update_record(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(record_id): IdPath<RecordId>,
    ValidatedJson(request): ValidatedJson<UpdateRecordRequest>,
) -> ApiResult<Json<RecordResponse>> {
    let service = RecordService::new(state.service_context());
    Ok(Json(service.update_record(auth.user_id, record_id, request).await?))
}

/// Delete a record and its attachments
///
/// DELETE /records/{record_id}
pub async fn delete_record(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(record_id): IdPath<RecordId>,
) -> ApiResult<NoContent> {
    let service = RecordService::new(state.service_context());
    service.delete_record(auth.user_id, record_id).await?;
    Ok(NoContent)
}
