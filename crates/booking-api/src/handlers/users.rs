//! User handlers
//!
//! Public profile reads and self-service account changes.

use axum::{
    extract::{Path, State},
    Json,
};
use booking_core::UserId;
use booking_service::{
    ChangePasswordRequest, UpdateEmailRequest, UpdateTelegramRequest, UpdateUserRequest,
    UserResponse, UserService,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List all users
///
/// GET /users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list_users().await?))
}

/// Get user by id
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath<UserId>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(user_id).await?))
}

/// Get user by login
///
/// GET /users/by-login/{login}
pub async fn get_user_by_login(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user_by_login(&login).await?))
}

/// Update the caller's profile
///
/// PATCH /users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_profile(auth.user_id, request).await?))
}

/// Update the caller's email
///
/// PATCH /users/me/email
pub async fn update_email(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateEmailRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_email(auth.user_id, request).await?))
}

/// Link a telegram handle to the caller
///
/// PATCH /users/me/telegram
pub async fn update_telegram(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateTelegramRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_telegram(auth.user_id, request).await?))
}

/// Change the caller's password; ends all their sessions
///
/// PUT /users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(NoContent)
}

/// Delete the caller's account
///
/// DELETE /users/me
pub async fn delete_me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    let service = UserService::new(state.service_context());
    service.delete_user(auth.user_id).await?;
    Ok(NoContent)
}
