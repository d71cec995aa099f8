//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    PasswordConfig, RateLimitConfig, ServerConfig, StorageConfig, StoreBackend, MAX_ACCESS_TOKEN_EXPIRY_SECS,
    MAX_REFRESH_TOKEN_EXPIRY_SECS,
};
