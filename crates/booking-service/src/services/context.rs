//! Service context - dependency container for services
//!
//! Holds all repositories, the blob store, and the auth helpers needed by services.

use std::sync::Arc;

use booking_common::config::MAX_REFRESH_TOKEN_EXPIRY_SECS;
use booking_common::{AppConfig, JwtService, PasswordService};
use booking_core::traits::{
    AttachmentRepository, BlobStore, CommentRepository, QueueRepository, RecordRepository,
    RefreshTokenRepository, UserRepository,
};
use booking_db::PgPool;
use chrono::Duration;

use super::error::{ServiceError, ServiceResult};

/// Tunables the workflows read at request time
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Lifetime of a refresh token
    pub refresh_token_ttl: Duration,
    /// Largest accepted attachment
    pub max_upload_bytes: u64,
    /// Lifetime of a presigned download URL, in seconds
    pub download_url_ttl: u64,
}

impl ServiceSettings {
    /// Settings taken from the application configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            refresh_token_ttl: Duration::seconds(
                config
                    .jwt
                    .refresh_token_expiry
                    .clamp(1, MAX_REFRESH_TOKEN_EXPIRY_SECS),
            ),
            max_upload_bytes: config.storage.max_file_size_bytes(),
            download_url_ttl: config.storage.download_url_expiry,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            refresh_token_ttl: Duration::days(7),
            max_upload_bytes: 10 * 1024 * 1024,
            download_url_ttl: 3600,
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Repositories (PostgreSQL or in-memory)
/// - The blob store for attachment contents
/// - JWT and password services
/// - The PostgreSQL pool when one is in use, for readiness checks
#[derive(Clone)]
pub struct ServiceContext {
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    queue_repo: Arc<dyn QueueRepository>,
    record_repo: Arc<dyn RecordRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    attachment_repo: Arc<dyn AttachmentRepository>,

    // Blob storage
    blob_store: Arc<dyn BlobStore>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: Arc<PasswordService>,

    settings: ServiceSettings,
}

impl ServiceContext {
    /// Get the PostgreSQL connection pool, if the context runs on PostgreSQL
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh token repository
    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    /// Get the queue repository
    pub fn queue_repo(&self) -> &dyn QueueRepository {
        self.queue_repo.as_ref()
    }

    /// Get the record repository
    pub fn record_repo(&self) -> &dyn RecordRepository {
        self.record_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the attachment repository
    pub fn attachment_repo(&self) -> &dyn AttachmentRepository {
        self.attachment_repo.as_ref()
    }

    // === Storage ===

    /// Get the blob store
    pub fn blob_store(&self) -> &dyn BlobStore {
        self.blob_store.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password hashing service
    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    queue_repo: Option<Arc<dyn QueueRepository>>,
    record_repo: Option<Arc<dyn RecordRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    attachment_repo: Option<Arc<dyn AttachmentRepository>>,
    blob_store: Option<Arc<dyn BlobStore>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<Arc<PasswordService>>,
    settings: Option<ServiceSettings>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Use one store for every repository
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: UserRepository
            + RefreshTokenRepository
            + QueueRepository
            + RecordRepository
            + CommentRepository
            + AttachmentRepository
            + 'static,
    {
        self.user_repo(store.clone())
            .refresh_token_repo(store.clone())
            .queue_repo(store.clone())
            .record_repo(store.clone())
            .comment_repo(store.clone())
            .attachment_repo(store)
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn queue_repo(mut self, repo: Arc<dyn QueueRepository>) -> Self {
        self.queue_repo = Some(repo);
        self
    }

    pub fn record_repo(mut self, repo: Arc<dyn RecordRepository>) -> Self {
        self.record_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn attachment_repo(mut self, repo: Arc<dyn AttachmentRepository>) -> Self {
        self.attachment_repo = Some(repo);
        self
    }

    pub fn blob_store(mut self, store: Arc<dyn BlobStore>) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            refresh_token_repo: self
                .refresh_token_repo
                .ok_or_else(|| ServiceError::validation("refresh_token_repo is required"))?,
            queue_repo: self
                .queue_repo
                .ok_or_else(|| ServiceError::validation("queue_repo is required"))?,
            record_repo: self
                .record_repo
                .ok_or_else(|| ServiceError::validation("record_repo is required"))?,
            comment_repo: self
                .comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            attachment_repo: self
                .attachment_repo
                .ok_or_else(|| ServiceError::validation("attachment_repo is required"))?,
            blob_store: self
                .blob_store
                .ok_or_else(|| ServiceError::validation("blob_store is required"))?,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            password_service: self
                .password_service
                .ok_or_else(|| ServiceError::validation("password_service is required"))?,
            settings: self.settings.unwrap_or_default(),
        })
    }
}
