//! Shared fixtures for the workflow tests

#![allow(dead_code)]

use std::sync::Arc;

use booking_common::{JwtService, PasswordConfig, PasswordService};
use booking_core::{QueueId, RecordId, Urgency, UserId};
use booking_db::MemoryStore;
use booking_service::{
    AuthService, CreateQueueRequest, CreateRecordRequest, QueueService, RecordService,
    RegisterRequest, ServiceContext, ServiceContextBuilder, ServiceSettings,
};
use booking_storage::{DownloadSigner, MemoryBlobStore};
use chrono::{DateTime, TimeZone, Utc};

pub const JWT_SECRET: &str = "workflow-test-secret";
pub const PUBLIC_URL: &str = "http://127.0.0.1:8000";
pub const PASSWORD: &str = "correct horse battery";

pub struct Harness {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    pub blobs: MemoryBlobStore,
    pub signer: DownloadSigner,
}

pub fn harness() -> Harness {
    harness_with(ServiceSettings::default())
}

pub fn harness_with(settings: ServiceSettings) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let signer = DownloadSigner::new(JWT_SECRET, PUBLIC_URL);
    let blobs = MemoryBlobStore::new(signer.clone());
    let passwords = PasswordService::new(&PasswordConfig::minimal()).unwrap();

    let ctx = ServiceContextBuilder::new()
        .store(store.clone())
        .blob_store(Arc::new(blobs.clone()))
        .jwt_service(Arc::new(JwtService::new(JWT_SECRET, 900)))
        .password_service(Arc::new(passwords))
        .settings(settings)
        .build()
        .unwrap();

    Harness {
        ctx,
        store,
        blobs,
        signer,
    }
}

pub fn register_request(login: &str) -> RegisterRequest {
    RegisterRequest {
        login: login.to_string(),
        email: format!("{login}@example.com"),
        password: PASSWORD.to_string(),
        email_notifications: false,
        telegram_login: None,
        telegram_notifications: false,
    }
}

pub async fn register(ctx: &ServiceContext, login: &str) -> UserId {
    AuthService::new(ctx)
        .register(register_request(login))
        .await
        .unwrap()
        .id
}

pub async fn create_queue(ctx: &ServiceContext, owner: UserId, name: &str) -> QueueId {
    QueueService::new(ctx)
        .create_queue(
            owner,
            CreateQueueRequest {
                name: name.to_string(),
                cleanup_interval_secs: None,
                record_interval_secs: Some(30 * 60),
            },
        )
        .await
        .unwrap()
        .id
}

pub async fn book(
    ctx: &ServiceContext,
    requester: UserId,
    queue_id: QueueId,
    meeting: DateTime<Utc>,
) -> RecordId {
    RecordService::new(ctx)
        .create_record(requester, record_request(queue_id, meeting))
        .await
        .unwrap()
        .id
}

pub fn record_request(queue_id: QueueId, meeting: DateTime<Utc>) -> CreateRecordRequest {
    CreateRecordRequest {
        queue_id,
        purpose: "consultation".to_string(),
        meeting_datetime: meeting,
        urgency: Urgency::Medium,
    }
}

/// 2024-01-01 at the given time, UTC
pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, minute, 0).unwrap()
}
