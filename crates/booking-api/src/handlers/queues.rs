//! Queue handlers

use axum::{extract::State, Json};
use booking_core::{QueueId, UserId};
use booking_service::{CreateQueueRequest, QueueResponse, QueueService, UpdateQueueRequest};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a queue owned by the caller
///
/// POST /queues
pub async fn create_queue(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateQueueRequest>,
) -> ApiResult<Created<Json<QueueResponse>>> {
    let service = QueueService::new(state.service_context());
    let response = service.create_queue(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List all queues
///
/// GET /queues
pub async fn list_queues(State(state): State<AppState>) -> ApiResult<Json<Vec<QueueResponse>>> {
    let service = QueueService::new(state.service_context());
    Ok(Json(service.list_queues().await?))
}

/// Queues owned by the caller
///
/// GET /queues/owner/me
pub async fn list_my_queues(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<QueueResponse>>> {
    let service = QueueService::new(state.service_context());
    Ok(Json(service.list_by_owner(auth.user_id).await?))
}

/// Queues owned by a user
///
/// GET /queues/owner/{owner_id}
pub async fn list_by_owner(
    State(state): State<AppState>,
    IdPath(owner_id): IdPath<UserId>,
) -> ApiResult<Json<Vec<QueueResponse>>> {
    let service = QueueService::new(state.service_context());
    Ok(Json(service.list_by_owner(owner_id).await?))
}

/// Get queue by id
///
/// GET /queues/{queue_id}
pub async fn get_queue(
    State(state): State<AppState>,
    IdPath(queue_id): IdPath<QueueId>,
) -> ApiResult<Json<QueueResponse>> {
    let service = QueueService::new(state.service_context());
    Ok(Json(service.get_queue(queue_id).await?))
}

/// Update a queue; owner only
///
/// PATCH /queues/{queue_id}
pub async fn update_queue(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(queue_id): IdPath<QueueId>,
    ValidatedJson(request): ValidatedJson<UpdateQueueRequest>,
) -> ApiResult<Json<QueueResponse>> {
    let service = QueueService::new(state.service_context());
    Ok(Json(service.update_queue(auth.user_id, queue_id, request).await?))
}

/// Delete a queue and everything booked in it; owner only
///
/// DELETE /queues/{queue_id}
pub async fn delete_queue(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(queue_id): IdPath<QueueId>,
) -> ApiResult<NoContent> {
    let service = QueueService::new(state.service_context());
    service.delete_queue(auth.user_id, queue_id).await?;
    Ok(NoContent)
}
