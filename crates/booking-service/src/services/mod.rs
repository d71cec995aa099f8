//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, authorization, and orchestration of domain operations.

pub mod attachment;
pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod queue;
pub mod record;
pub mod session;
pub mod user;

// Re-export all services for convenience
pub use attachment::AttachmentService;
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use queue::QueueService;
pub use record::RecordService;
pub use session::SessionService;
pub use user::UserService;
