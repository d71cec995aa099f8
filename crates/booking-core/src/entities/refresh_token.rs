//! Refresh token entity - a persisted session credential
//!
//! Only a salted hash of the opaque secret is stored. The raw secret is handed
//! to the client once and never persisted.

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{RefreshTokenId, UserId};

/// Persisted refresh token record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: RefreshTokenId,
    pub user_id: UserId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshToken {
    /// Create a new, unrevoked token that expires after `ttl`
    #[must_use]
    pub fn new(id: RefreshTokenId, user_id: UserId, token_hash: String, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            token_hash,
            created_at: now,
            expires_at: now + ttl,
            revoked: false,
        }
    }

    /// Check expiry against a given instant
    #[inline]
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// A token is valid iff it is not revoked and `now < expires_at`
    #[inline]
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && !self.is_expired_at(now)
    }

    /// Check validity against the current time
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(ttl: Duration) -> RefreshToken {
        RefreshToken::new(RefreshTokenId::new(), UserId::new(), "hash".to_string(), ttl)
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let token = token(Duration::days(7));
        assert!(token.is_valid());
        assert_eq!(token.expires_at - token.created_at, Duration::days(7));
    }

    #[test]
    fn test_revoked_token_is_invalid() {
        let mut token = token(Duration::days(7));
        token.revoked = true;
        assert!(!token.is_valid());
    }

    #[test]
    fn test_expiry_boundary() {
        let token = token(Duration::minutes(5));
        assert!(token.is_valid_at(token.expires_at - Duration::seconds(1)));
        assert!(!token.is_valid_at(token.expires_at));
    }
}
