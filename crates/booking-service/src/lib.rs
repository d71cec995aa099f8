//! # booking-service
//!
//! Application layer containing the booking workflows, session handling, and DTOs.
//!
//! Services borrow a [`ServiceContext`] and talk to storage only through the
//! repository and blob store traits from `booking-core`, so the same code runs
//! against PostgreSQL or the in-memory store.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    AttachmentService, AuthService, CommentService, QueueService, RecordService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, SessionService,
    UserService,
};
