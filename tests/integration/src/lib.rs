//! Integration test utilities for the booking server
//!
//! Boots the real router on an ephemeral port, backed by the in-memory
//! store, and provides typed fixtures for driving it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
