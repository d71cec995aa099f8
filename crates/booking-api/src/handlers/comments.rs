//! Comment cache handlers

use axum::{extract::State, Json};
use booking_core::QueueId;
use booking_service::{CommentResponse, CommentService, UpsertCommentRequest};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Cached comments of a queue; owner only
///
/// GET /comments/queue/{queue_id}
pub async fn list_queue_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(queue_id): IdPath<QueueId>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_queue_comments(auth.user_id, queue_id).await?))
}

/// Apply a new or cached comment to a record
///
/// PATCH /comments
pub async fn upsert_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpsertCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.upsert_comment(auth.user_id, request).await?))
}
