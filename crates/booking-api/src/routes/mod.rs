//! Route definitions
//!
//! All API routes organized by resource.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{attachments, auth, comments, files, health, queues, records, users};
use crate::state::AppState;

/// Multipart framing allowance on top of the configured file size limit
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main API router (health routes are mounted separately)
pub fn create_router(max_upload_bytes: u64) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(queue_routes())
        .merge(record_routes())
        .merge(comment_routes())
        .merge(attachment_routes(max_upload_bytes))
        .merge(file_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/token", post(auth::token))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/logout-all", post(auth::logout_all))
        .route("/auth/me", get(auth::me))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/me", patch(users::update_me).delete(users::delete_me))
        .route("/users/me/email", patch(users::update_email))
        .route("/users/me/telegram", patch(users::update_telegram))
        .route("/users/me/password", put(users::change_password))
        .route("/users/by-login/:login", get(users::get_user_by_login))
        .route("/users/:user_id", get(users::get_user))
}

/// Queue routes
fn queue_routes() -> Router<AppState> {
    Router::new()
        .route("/queues", post(queues::create_queue).get(queues::list_queues))
        .route("/queues/owner/me", get(queues::list_my_queues))
        .route("/queues/owner/:owner_id", get(queues::list_by_owner))
        .route(
            "/queues/:queue_id",
            get(queues::get_queue)
                .patch(queues::update_queue)
                .delete(queues::delete_queue),
        )
}

/// Record routes
fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/records", post(records::create_record))
        .route("/records/me", get(records::list_my_records))
        .route("/records/queue/:queue_id", get(records::list_queue_records))
        .route(
            "/records/:record_id",
            get(records::get_record)
                .patch(records::update_record)
                .delete(records::delete_record),
        )
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", patch(comments::upsert_comment))
        .route("/comments/queue/:queue_id", get(comments::list_queue_comments))
}

/// Attachment routes
fn attachment_routes(max_upload_bytes: u64) -> Router<AppState> {
    let body_limit = usize::try_from(max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            "/attachments/records/:record_id",
            post(attachments::upload_attachment)
                .get(attachments::list_record_attachments)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(
            "/attachments/:attachment_id",
            get(attachments::get_attachment).delete(attachments::detach_attachment),
        )
}

/// Presigned download route
fn file_routes() -> Router<AppState> {
    Router::new().route("/files/*object_key", get(files::download))
}
