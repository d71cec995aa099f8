//! Per-queue comment cache: bounded size, eviction by creation, reuse by id

mod common;

use std::time::Duration;

use booking_core::{CommentId, DomainError, QueueId, RecordId, UserId};
use booking_service::{CommentResponse, CommentService, RecordService, ServiceContext, UpsertCommentRequest};

use common::{at, book, create_queue, harness, register};

async fn apply(
    ctx: &ServiceContext,
    acting: UserId,
    record_id: RecordId,
    text: &str,
    comment_id: Option<CommentId>,
) -> CommentResponse {
    // Keep creation timestamps strictly ordered
    tokio::time::sleep(Duration::from_millis(2)).await;
    CommentService::new(ctx)
        .upsert_comment(
            acting,
            UpsertCommentRequest {
                record_id,
                text: text.to_string(),
                comment_id,
            },
        )
        .await
        .unwrap()
}

async fn texts(ctx: &ServiceContext, owner: UserId, queue_id: QueueId) -> Vec<String> {
    CommentService::new(ctx)
        .list_queue_comments(owner, queue_id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.text)
        .collect()
}

#[tokio::test]
async fn test_sixth_comment_evicts_the_oldest() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let student = register(&h.ctx, "student").await;
    let queue_id = create_queue(&h.ctx, owner, "dean").await;
    let record_id = book(&h.ctx, student, queue_id, at(10, 0)).await;

    for i in 1..=6 {
        apply(&h.ctx, owner, record_id, &format!("t{i}"), None).await;
    }

    assert_eq!(
        texts(&h.ctx, owner, queue_id).await,
        vec!["t2", "t3", "t4", "t5", "t6"]
    );

    let record = RecordService::new(&h.ctx)
        .get_record(student, record_id)
        .await
        .unwrap();
    assert_eq!(record.manager_comment.as_deref(), Some("t6"));
}

#[tokio::test]
async fn test_cache_never_exceeds_five() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let queue_id = create_queue(&h.ctx, owner, "dean").await;
    let first = book(&h.ctx, owner, queue_id, at(9, 0)).await;
    let second = book(&h.ctx, owner, queue_id, at(11, 0)).await;

    for i in 0..12 {
        let record_id = if i % 2 == 0 { first } else { second };
        apply(&h.ctx, owner, record_id, &format!("c{i}"), None).await;
        assert!(texts(&h.ctx, owner, queue_id).await.len() <= 5);
    }
    assert_eq!(
        texts(&h.ctx, owner, queue_id).await,
        vec!["c7", "c8", "c9", "c10", "c11"]
    );
}

#[tokio::test]
async fn test_caches_are_per_queue() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let dean = create_queue(&h.ctx, owner, "dean").await;
    let library = create_queue(&h.ctx, owner, "library").await;
    let dean_record = book(&h.ctx, owner, dean, at(10, 0)).await;
    let library_record = book(&h.ctx, owner, library, at(10, 0)).await;

    apply(&h.ctx, owner, library_record, "bring your card", None).await;
    for i in 0..6 {
        apply(&h.ctx, owner, dean_record, &format!("d{i}"), None).await;
    }

    assert_eq!(texts(&h.ctx, owner, library).await, vec!["bring your card"]);
    assert_eq!(texts(&h.ctx, owner, dean).await.len(), 5);
}

#[tokio::test]
async fn test_reuse_refreshes_without_growing() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let queue_id = create_queue(&h.ctx, owner, "dean").await;
    let first = book(&h.ctx, owner, queue_id, at(9, 0)).await;
    let second = book(&h.ctx, owner, queue_id, at(11, 0)).await;

    let created = apply(&h.ctx, owner, first, "approved", None).await;
    apply(&h.ctx, owner, first, "pending review", None).await;

    let reused = apply(&h.ctx, owner, second, "approved, bring id", Some(created.comment_id)).await;

    assert_eq!(reused.comment_id, created.comment_id);
    assert_eq!(reused.created_at, created.created_at);
    assert!(reused.last_used_at > created.last_used_at);
    // The comment keeps the record it was first written for
    assert_eq!(reused.record_id, first);
    assert_eq!(
        texts(&h.ctx, owner, queue_id).await,
        vec!["approved, bring id", "pending review"]
    );

    let record = RecordService::new(&h.ctx)
        .get_record(owner, second)
        .await
        .unwrap();
    assert_eq!(record.manager_comment.as_deref(), Some("approved, bring id"));
}

#[tokio::test]
async fn test_reuse_does_not_protect_from_eviction() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let queue_id = create_queue(&h.ctx, owner, "dean").await;
    let record_id = book(&h.ctx, owner, queue_id, at(10, 0)).await;

    let oldest = apply(&h.ctx, owner, record_id, "t1", None).await;
    for i in 2..=5 {
        apply(&h.ctx, owner, record_id, &format!("t{i}"), None).await;
    }
    // Recently used, but still the earliest created
    apply(&h.ctx, owner, record_id, "t1 again", Some(oldest.comment_id)).await;
    apply(&h.ctx, owner, record_id, "t6", None).await;

    let remaining = texts(&h.ctx, owner, queue_id).await;
    assert_eq!(remaining, vec!["t2", "t3", "t4", "t5", "t6"]);

    let err = CommentService::new(&h.ctx)
        .upsert_comment(
            owner,
            UpsertCommentRequest {
                record_id,
                text: "gone".to_string(),
                comment_id: Some(oldest.comment_id),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_domain(|e| matches!(e, DomainError::CommentNotFound(_))));
}

#[tokio::test]
async fn test_only_queue_owner_may_comment() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let student = register(&h.ctx, "student").await;
    let queue_id = create_queue(&h.ctx, owner, "dean").await;
    let record_id = book(&h.ctx, student, queue_id, at(10, 0)).await;
    let comments = CommentService::new(&h.ctx);

    // Requesting the record is not enough
    let err = comments
        .upsert_comment(
            student,
            UpsertCommentRequest {
                record_id,
                text: "please hurry".to_string(),
                comment_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_domain(|e| matches!(e, DomainError::NotQueueOwner)));
    assert_eq!(err.status_code(), 403);

    let err = comments
        .list_queue_comments(student, queue_id)
        .await
        .unwrap_err();
    assert!(err.is_domain(|e| matches!(e, DomainError::NotQueueOwner)));

    assert!(texts(&h.ctx, owner, queue_id).await.is_empty());
}

#[tokio::test]
async fn test_comment_from_another_queue_is_rejected() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let dean = create_queue(&h.ctx, owner, "dean").await;
    let library = create_queue(&h.ctx, owner, "library").await;
    let dean_record = book(&h.ctx, owner, dean, at(10, 0)).await;
    let library_record = book(&h.ctx, owner, library, at(10, 0)).await;

    let library_comment = apply(&h.ctx, owner, library_record, "bring your card", None).await;

    let err = CommentService::new(&h.ctx)
        .upsert_comment(
            owner,
            UpsertCommentRequest {
                record_id: dean_record,
                text: "bring your card".to_string(),
                comment_id: Some(library_comment.comment_id),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_domain(|e| matches!(e, DomainError::CommentQueueMismatch)));
    assert!(texts(&h.ctx, owner, dean).await.is_empty());
}

#[tokio::test]
async fn test_unknown_record_and_comment() {
    let h = harness();
    let owner = register(&h.ctx, "manager").await;
    let queue_id = create_queue(&h.ctx, owner, "dean").await;
    let record_id = book(&h.ctx, owner, queue_id, at(10, 0)).await;
    let comments = CommentService::new(&h.ctx);

    let err = comments
        .upsert_comment(
            owner,
            UpsertCommentRequest {
                record_id: RecordId::new(),
                text: "hello".to_string(),
                comment_id: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_domain(|e| matches!(e, DomainError::RecordNotFound(_))));
    assert_eq!(err.status_code(), 404);

    let err = comments
        .upsert_comment(
            owner,
            UpsertCommentRequest {
                record_id,
                text: "hello".to_string(),
                comment_id: Some(CommentId::new()),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_domain(|e| matches!(e, DomainError::CommentNotFound(_))));
}
