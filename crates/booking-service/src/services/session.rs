//! Session service
//!
//! Issues, matches, rotates and revokes refresh tokens. Stored tokens only
//! hold a salted hash of the secret, so a presented secret is matched by
//! verifying it against every active token in turn.

use booking_common::{generate_refresh_secret, AppError, TokenPair};
use booking_core::entities::RefreshToken;
use booking_core::value_objects::{RefreshTokenId, UserId};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Refresh token lifecycle
pub struct SessionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionService<'a> {
    /// Create a new SessionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Persist a new refresh token for the user and return its raw secret
    #[instrument(skip(self))]
    pub async fn issue_refresh_token(&self, user_id: UserId) -> ServiceResult<String> {
        let secret = generate_refresh_secret();
        let token_hash = self.ctx.password_service().hash(&secret)?;
        let token = RefreshToken::new(
            RefreshTokenId::new(),
            user_id,
            token_hash,
            self.ctx.settings().refresh_token_ttl,
        );
        self.ctx.refresh_token_repo().create(&token).await?;

        debug!(token_id = %token.id, "Refresh token issued");
        Ok(secret)
    }

    /// Issue a fresh access token and refresh token
    #[instrument(skip(self))]
    pub async fn issue_pair(&self, user_id: UserId) -> ServiceResult<TokenPair> {
        let jwt = self.ctx.jwt_service();
        let access_token = jwt.issue_access_token(user_id)?;
        let refresh_token = self.issue_refresh_token(user_id).await?;
        Ok(TokenPair::bearer(
            access_token,
            refresh_token,
            jwt.access_token_expiry(),
        ))
    }

    /// Find the active token whose hash matches `secret`
    #[instrument(skip_all)]
    pub async fn find_valid(&self, secret: &str) -> ServiceResult<Option<RefreshToken>> {
        let candidates = self.ctx.refresh_token_repo().find_active(Utc::now()).await?;
        let passwords = self.ctx.password_service();

        for token in candidates {
            match passwords.verify(secret, &token.token_hash) {
                Ok(true) => return Ok(Some(token)),
                Ok(false) => {}
                Err(e) => warn!(token_id = %token.id, error = %e, "Skipping unreadable token hash"),
            }
        }
        Ok(None)
    }

    /// Exchange a refresh secret for a new pair, revoking the old token
    #[instrument(skip_all)]
    pub async fn rotate(&self, secret: &str) -> ServiceResult<TokenPair> {
        let Some(token) = self.find_valid(secret).await? else {
            warn!("Refresh failed: no active token matches");
            return Err(AppError::InvalidToken.into());
        };

        // Only one concurrent refresh may win the conditional revoke
        if !self.ctx.refresh_token_repo().revoke(token.id).await? {
            warn!(token_id = %token.id, "Refresh failed: token already revoked");
            return Err(AppError::TokenRevoked.into());
        }

        let pair = self.issue_pair(token.user_id).await?;
        info!(user_id = %token.user_id, "Refresh token rotated");
        Ok(pair)
    }

    /// Revoke the token matching `secret`; unknown secrets are ignored
    #[instrument(skip_all)]
    pub async fn revoke(&self, secret: &str) -> ServiceResult<()> {
        if let Some(token) = self.find_valid(secret).await? {
            self.ctx.refresh_token_repo().revoke(token.id).await?;
            info!(user_id = %token.user_id, "Refresh token revoked");
        }
        Ok(())
    }

    /// Revoke every active token of the user
    #[instrument(skip(self))]
    pub async fn revoke_all(&self, user_id: UserId) -> ServiceResult<u64> {
        let revoked = self
            .ctx
            .refresh_token_repo()
            .revoke_all_for_user(user_id)
            .await?;
        info!(revoked, "All refresh tokens revoked");
        Ok(revoked)
    }
}
