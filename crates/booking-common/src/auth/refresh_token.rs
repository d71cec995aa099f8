//! Opaque refresh token secrets
//!
//! The raw secret is handed to the client once. Only a salted hash of it
//! (see [`crate::PasswordService`]) is ever persisted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;

/// Entropy of a refresh secret
pub const REFRESH_SECRET_BYTES: usize = 32;

/// Generate a new URL-safe refresh secret
#[must_use]
pub fn generate_refresh_secret() -> String {
    let mut bytes = [0u8; REFRESH_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
