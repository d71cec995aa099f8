//! # booking-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx,
//! plus a process-local [`MemoryStore`] implementing the same traits.
//!
//! ## Overview
//!
//! - Connection pool management and the embedded schema
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations with explicit cascading deletes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use booking_db::{create_pool, run_migrations, PgUserRepository, PoolConfig};
//! use booking_core::traits::UserRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new("postgres://localhost/booking", 20, 5)).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgAttachmentRepository, PgCommentRepository, PgQueueRepository, PgRecordRepository,
    PgRefreshTokenRepository, PgUserRepository,
};
