//! Authentication utilities

mod jwt;
mod password;
mod refresh_token;

pub use jwt::{Claims, JwtService, TokenPair};
pub use password::PasswordService;
pub use refresh_token::{generate_refresh_secret, REFRESH_SECRET_BYTES};
