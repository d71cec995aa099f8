//! Entity to model mappers
//!
//! Conversions from database rows to domain entities. Entities are written
//! back by binding their fields directly in the repository queries.

mod attachment;
mod comment;
mod queue;
mod record;
mod refresh_token;
mod user;

pub use queue::duration_to_secs;
