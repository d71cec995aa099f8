//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! configuration, and the signer that guards file downloads.

use std::sync::Arc;

use booking_common::AppConfig;
use booking_service::ServiceContext;
use booking_storage::DownloadSigner;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Verifies download tokens on `/files`
    signer: DownloadSigner,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, config: AppConfig, signer: DownloadSigner) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            signer,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the download token signer
    pub fn signer(&self) -> &DownloadSigner {
        &self.signer
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("signer", &self.signer)
            .finish()
    }
}
