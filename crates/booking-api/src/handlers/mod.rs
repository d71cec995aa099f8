//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod attachments;
pub mod auth;
pub mod comments;
pub mod files;
pub mod health;
pub mod queues;
pub mod records;
pub mod users;
