//! Server setup and initialization
//!
//! Provides the application builder, dependency wiring for both store
//! backends, and the server runner.

use std::sync::Arc;

use axum::Router;
use booking_common::{AppConfig, AppError, JwtService, PasswordService, StoreBackend};
use booking_db::{
    create_pool, run_migrations, MemoryStore, PgAttachmentRepository, PgCommentRepository,
    PgQueueRepository, PgRecordRepository, PgRefreshTokenRepository, PgUserRepository, PoolConfig,
};
use booking_service::{ServiceContextBuilder, ServiceSettings};
use booking_storage::{DownloadSigner, LocalBlobStore, MemoryBlobStore};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();

    let api = apply_middleware_with_config(
        create_router(config.storage.max_file_size_bytes()),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let signer = DownloadSigner::new(&config.jwt.secret, &config.storage.public_url);
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let password_service = Arc::new(PasswordService::new(&config.password)?);

    let builder = ServiceContextBuilder::new()
        .jwt_service(jwt_service)
        .password_service(password_service)
        .settings(ServiceSettings::from_config(&config));

    let builder = match config.store {
        StoreBackend::Postgres => {
            let url = config.database.url.clone().ok_or_else(|| {
                AppError::Config("DATABASE_URL is required for the postgres store".to_string())
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::new(
                url,
                config.database.max_connections,
                config.database.min_connections,
            ))
            .await
            .map_err(AppError::internal)?;
            info!("PostgreSQL connection established");

            if config.database.run_migrations {
                run_migrations(&pool).await.map_err(AppError::internal)?;
                info!("Database migrations applied");
            }

            let blob_store = LocalBlobStore::new(&config.storage.upload_dir, signer.clone());
            info!(root = %blob_store.root().display(), "Using local blob store");

            builder
                .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
                .refresh_token_repo(Arc::new(PgRefreshTokenRepository::new(pool.clone())))
                .queue_repo(Arc::new(PgQueueRepository::new(pool.clone())))
                .record_repo(Arc::new(PgRecordRepository::new(pool.clone())))
                .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
                .attachment_repo(Arc::new(PgAttachmentRepository::new(pool.clone())))
                .blob_store(Arc::new(blob_store))
                .pool(pool)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; all data is lost on shutdown");
            builder
                .store(Arc::new(MemoryStore::new()))
                .blob_store(Arc::new(MemoryBlobStore::new(signer.clone())))
        }
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, signer))
}

/// Serve the application on an already bound listener until ctrl-c
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener.local_addr().map_err(AppError::internal)?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
