//! API Integration Tests
//!
//! Each test boots its own server on an ephemeral port with the in-memory
//! store, so no external services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use chrono::{DateTime, TimeZone, Utc};
use integration_tests::{assert_error, assert_json, assert_status, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 4, hour, minute, 0).unwrap()
}

/// Register a fresh user and log them in
async fn signed_in(server: &TestServer) -> (UserResponse, TokenResponse) {
    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await.unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/auth/token", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let tokens: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    (user, tokens)
}

async fn create_queue(server: &TestServer, token: &str) -> QueueResponse {
    let response = server
        .post_auth("/queues", token, &CreateQueueRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn book(server: &TestServer, token: &str, queue_id: &str, when: DateTime<Utc>) -> RecordResponse {
    let response = server
        .post_auth("/records", token, &CreateRecordRequest::at(queue_id, when))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/queues").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_me() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (user, tokens) = signed_in(&server).await;

    assert_eq!(tokens.token_type, "bearer");
    assert_eq!(tokens.expires_in, 900);

    let response = server.get_auth("/auth/me", &tokens.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, user.id);
    assert_eq!(me.login, user.login);
    assert!(!me.email_notifications);
}

#[tokio::test]
async fn test_register_duplicates_conflict() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DUPLICATE_LOGIN");

    let mut same_email = RegisterRequest::unique();
    same_email.email = request.email.clone();
    let response = server.post("/auth/register", &same_email).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_login_failures_look_alike() {
    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/auth/register", &request).await.unwrap();

    let wrong_password = server
        .post(
            "/auth/token",
            &json!({ "login": request.login, "password": "not the password" }),
        )
        .await
        .unwrap();
    let wrong_password: ErrorBody = assert_json(wrong_password, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    let unknown_user = server
        .post(
            "/auth/token",
            &json!({ "login": "nobody-at-all", "password": "not the password" }),
        )
        .await
        .unwrap();
    let unknown_user: ErrorBody = assert_json(unknown_user, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();

    assert_eq!(wrong_password.error.code, unknown_user.error.code);
    assert_eq!(wrong_password.error.message, unknown_user.error.message);
}

#[tokio::test]
async fn test_refresh_rotates_and_logout_is_idempotent() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, tokens) = signed_in(&server).await;

    let old = RefreshRequest {
        refresh_token: tokens.refresh_token.clone(),
    };
    let response = server.post("/auth/refresh", &old).await.unwrap();
    let rotated: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated.refresh_token, tokens.refresh_token);

    // The old secret is spent
    let response = server.post("/auth/refresh", &old).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let current = RefreshRequest {
        refresh_token: rotated.refresh_token,
    };
    for _ in 0..2 {
        let response = server.post("/auth/logout", &current).await.unwrap();
        let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body, json!({ "msg": "ok" }));
    }

    let response = server.post("/auth/refresh", &current).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_all_and_password_change() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (user, tokens) = signed_in(&server).await;

    let response = server
        .put_auth(
            "/users/me/password",
            &tokens.access_token,
            &json!({ "current_password": TEST_PASSWORD, "new_password": "Another-Pass-456" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post(
            "/auth/refresh",
            &RefreshRequest {
                refresh_token: tokens.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post(
            "/auth/token",
            &json!({ "login": user.login, "password": "Another-Pass-456" }),
        )
        .await
        .unwrap();
    let fresh: TokenResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server
        .post_auth("/auth/logout-all", &fresh.access_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .post(
            "/auth/refresh",
            &RefreshRequest {
                refresh_token: fresh.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_user_profile_updates() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (user, tokens) = signed_in(&server).await;
    let (other, _) = signed_in(&server).await;

    let response = server
        .patch_auth(
            "/users/me/telegram",
            &tokens.access_token,
            &json!({ "telegram_login": format!("tg_{}", user.login), "telegram_notifications": true }),
        )
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.telegram_login, Some(format!("tg_{}", user.login)));
    assert!(updated.telegram_notifications);

    let response = server
        .patch_auth(
            "/users/me/email",
            &tokens.access_token,
            &json!({ "email": other.email }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DUPLICATE_EMAIL");

    let response = server
        .get(&format!("/users/by-login/{}", user.login))
        .await
        .unwrap();
    let found: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.id, user.id);

    let response = server.get("/users/by-login/nobody-at-all").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_account_cascades() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, owner_tokens) = signed_in(&server).await;
    let (_, student_tokens) = signed_in(&server).await;

    let queue = create_queue(&server, &owner_tokens.access_token).await;
    book(&server, &student_tokens.access_token, &queue.id, at(10, 0)).await;

    let response = server
        .delete_auth("/users/me", &owner_tokens.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("/users/{}", owner.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server.get(&format!("/queues/{}", queue.id)).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth("/records/me", &student_tokens.access_token)
        .await
        .unwrap();
    let records: Vec<RecordResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(records.is_empty());

    // The deleted user's token no longer resolves
    let response = server
        .get_auth("/auth/me", &owner_tokens.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Booking Tests
// ============================================================================

#[tokio::test]
async fn test_booking_collision() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let (student, student_tokens) = signed_in(&server).await;
    let queue = create_queue(&server, &owner.access_token).await;
    assert_eq!(queue.record_interval_secs, 1800);
    assert_eq!(queue.cleanup_interval_secs, 86_400);

    let first = book(&server, &student_tokens.access_token, &queue.id, at(10, 0)).await;
    assert_eq!(first.user_id, student.id);
    assert_eq!(first.status, "PENDING");
    assert_eq!(first.urgency, "MEDIUM");

    let response = server
        .post_auth(
            "/records",
            &student_tokens.access_token,
            &CreateRecordRequest::at(&queue.id, at(10, 20)),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "TIME_COLLISION");

    book(&server, &student_tokens.access_token, &queue.id, at(10, 31)).await;
    book(&server, &owner.access_token, &queue.id, at(9, 30)).await;

    let response = server
        .get(&format!("/records/queue/{}", queue.id))
        .await
        .unwrap();
    let records: Vec<RecordResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let times: Vec<DateTime<Utc>> = records.iter().map(|r| r.meeting_datetime).collect();
    assert_eq!(times, vec![at(9, 30), at(10, 0), at(10, 31)]);
}

#[tokio::test]
async fn test_record_participants() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let (_, student) = signed_in(&server).await;
    let (_, stranger) = signed_in(&server).await;
    let queue = create_queue(&server, &owner.access_token).await;
    let record = book(&server, &student.access_token, &queue.id, at(10, 0)).await;
    let path = format!("/records/{}", record.id);

    let response = server.get_auth(&path, &stranger.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_RECORD_PARTICIPANT");

    let response = server
        .patch_auth(&path, &owner.access_token, &json!({ "status": "CONFIRMED" }))
        .await
        .unwrap();
    let updated: RecordResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.status, "CONFIRMED");
    assert_eq!(updated.purpose, "consultation");

    let response = server.delete_auth(&path, &student.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_queue_ownership() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (owner_user, owner) = signed_in(&server).await;
    let (_, other) = signed_in(&server).await;
    let queue = create_queue(&server, &owner.access_token).await;
    assert_eq!(queue.owner_id, owner_user.id);
    let path = format!("/queues/{}", queue.id);

    let response = server
        .post_auth(
            "/queues",
            &other.access_token,
            &json!({ "name": queue.name }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "DUPLICATE_QUEUE_NAME");

    let response = server
        .patch_auth(&path, &other.access_token, &json!({ "name": "taken over" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .get_auth("/queues/owner/me", &owner.access_token)
        .await
        .unwrap();
    let mine: Vec<QueueResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 1);

    let response = server.delete_auth(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get(&format!("/queues/owner/{}", owner_user.id))
        .await
        .unwrap();
    let remaining: Vec<QueueResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(remaining.is_empty());
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_cache_over_http() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let (_, student) = signed_in(&server).await;
    let queue = create_queue(&server, &owner.access_token).await;
    let record = book(&server, &student.access_token, &queue.id, at(10, 0)).await;

    let mut first: Option<CommentResponse> = None;
    for i in 1..=6 {
        // Distinct creation timestamps
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let response = server
            .patch_auth(
                "/comments",
                &owner.access_token,
                &UpsertCommentRequest {
                    record_id: record.id.clone(),
                    text: format!("t{i}"),
                    comment_id: None,
                },
            )
            .await
            .unwrap();
        let comment: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(comment.queue_id, queue.id);
        first.get_or_insert(comment);
    }

    let comments_path = format!("/comments/queue/{}", queue.id);
    let response = server
        .get_auth(&comments_path, &owner.access_token)
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["t2", "t3", "t4", "t5", "t6"]);

    // The evicted comment can no longer be reused
    let evicted = first.unwrap();
    let response = server
        .patch_auth(
            "/comments",
            &owner.access_token,
            &UpsertCommentRequest {
                record_id: record.id.clone(),
                text: "again".to_string(),
                comment_id: Some(evicted.comment_id),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Reuse keeps the count
    let response = server
        .patch_auth(
            "/comments",
            &owner.access_token,
            &UpsertCommentRequest {
                record_id: record.id.clone(),
                text: "t3 edited".to_string(),
                comment_id: Some(comments[1].comment_id.clone()),
            },
        )
        .await
        .unwrap();
    let reused: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(reused.created_at, comments[1].created_at);
    assert!(reused.last_used_at >= comments[1].last_used_at);

    let response = server
        .get_auth(&comments_path, &owner.access_token)
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.len(), 5);

    let response = server
        .get_auth(&format!("/records/{}", record.id), &student.access_token)
        .await
        .unwrap();
    let record: RecordResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(record.manager_comment.as_deref(), Some("t3 edited"));

    // Only the queue owner manages comments
    let response = server
        .get_auth(&comments_path, &student.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Attachment Tests
// ============================================================================

#[tokio::test]
async fn test_attachment_upload_download_detach() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let (_, student) = signed_in(&server).await;
    let queue = create_queue(&server, &owner.access_token).await;
    let record = book(&server, &student.access_token, &queue.id, at(10, 0)).await;

    let response = server
        .upload_auth(
            &format!("/attachments/records/{}", record.id),
            &student.access_token,
            "Transcript.PDF",
            "application/pdf",
            b"%PDF-1.7 transcript".to_vec(),
        )
        .await
        .unwrap();
    let attachment: AttachmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(attachment.record_id, record.id);
    assert_eq!(attachment.original_filename, "Transcript.PDF");
    assert_eq!(attachment.content_type, "application/pdf");
    assert_eq!(attachment.size_bytes, 19);
    assert!(attachment
        .download_url
        .starts_with(&format!("{}/files/{}/", server.base_url(), record.id)));
    assert!(attachment.download_url.contains(".pdf?token="));

    let response = server.get_url(&attachment.download_url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"Transcript.PDF\"; filename*=UTF-8''Transcript.PDF")
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), b"%PDF-1.7 transcript");

    // A token is bound to its object key
    let (_, token) = attachment.download_url.split_once("?token=").unwrap();
    let response = server
        .get(&format!("/files/{}/other.pdf?token={token}", record.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .get_auth(
            &format!("/attachments/records/{}", record.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let listed: Vec<AttachmentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 1);

    let response = server
        .delete_auth(
            &format!("/attachments/{}", attachment.id),
            &student.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The blob went with the row
    let response = server.get_url(&attachment.download_url).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_attachment_size_limit() {
    let server = TestServer::start_with(|key| match key {
        "MAX_FILE_SIZE_MB" => Some("1".to_string()),
        _ => None,
    })
    .await
    .expect("Failed to start server");
    let (_, owner) = signed_in(&server).await;
    let queue = create_queue(&server, &owner.access_token).await;
    let record = book(&server, &owner.access_token, &queue.id, at(10, 0)).await;
    let path = format!("/attachments/records/{}", record.id);

    let response = server
        .upload_auth(
            &path,
            &owner.access_token,
            "big.bin",
            "application/octet-stream",
            vec![0_u8; 1024 * 1024 + 1],
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::PAYLOAD_TOO_LARGE)
        .await
        .unwrap();

    let response = server.get_auth(&path, &owner.access_token).await.unwrap();
    let listed: Vec<AttachmentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(listed.is_empty());
}
