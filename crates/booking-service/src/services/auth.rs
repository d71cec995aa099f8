//! Authentication service
//!
//! Handles registration, login, token refresh, logout, and bearer token
//! resolution.

use booking_common::AppError;
use booking_core::entities::User;
use booking_core::value_objects::UserId;
use tracing::{info, instrument, warn};

use crate::dto::{
    LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest, TokenResponse,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn sessions(&self) -> SessionService<'a> {
        SessionService::new(self.ctx)
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<UserResponse> {
        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let mut user = User::new(UserId::new(), request.login, request.email);
        user.set_notifications(Some(request.email_notifications), None);
        user.set_telegram(request.telegram_login, Some(request.telegram_notifications));

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");
        Ok(UserResponse::from(user))
    }

    /// Login with login and password
    ///
    /// Unknown logins and wrong passwords fail with the same error.
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let Some(user) = self.ctx.user_repo().find_by_login(&request.login).await? else {
            self.ctx.password_service().verify_decoy(&request.password);
            warn!("Login failed: user not found");
            return Err(AppError::InvalidCredentials.into());
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            self.ctx.password_service().verify_decoy(&request.password);
            warn!(user_id = %user.id, "Login failed: no password hash");
            return Err(AppError::InvalidCredentials.into());
        };

        if !self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)?
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let pair = self.sessions().issue_pair(user.id).await?;
        info!(user_id = %user.id, "User logged in successfully");
        Ok(pair.into())
    }

    /// Rotate a refresh token into a new pair
    #[instrument(skip_all)]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<TokenResponse> {
        let pair = self.sessions().rotate(&request.refresh_token).await?;
        Ok(pair.into())
    }

    /// Revoke a refresh token; logging out twice is not an error
    #[instrument(skip_all)]
    pub async fn logout(&self, request: RefreshTokenRequest) -> ServiceResult<MessageResponse> {
        self.sessions().revoke(&request.refresh_token).await?;
        Ok(MessageResponse::ok())
    }

    /// Revoke every refresh token of the acting user
    #[instrument(skip(self))]
    pub async fn logout_all(&self, user_id: UserId) -> ServiceResult<()> {
        self.sessions().revoke_all(user_id).await?;
        Ok(())
    }

    /// Resolve a bearer access token to its user
    ///
    /// Every failure collapses into `AppError::Unauthorized` so callers can't
    /// tell which check rejected the token.
    #[instrument(skip_all)]
    pub async fn resolve_user(&self, access_token: &str) -> ServiceResult<User> {
        let user_id = self
            .ctx
            .jwt_service()
            .validate_access_token(access_token)
            .map_err(|e| {
                warn!(error = %e, "Access token rejected");
                unauthorized()
            })?;

        match self.ctx.user_repo().find_by_id(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                warn!(user_id = %user_id, "Access token subject no longer exists");
                Err(unauthorized())
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "User lookup failed during token resolution");
                Err(unauthorized())
            }
        }
    }

    /// Profile of the bearer of `access_token`
    pub async fn me(&self, access_token: &str) -> ServiceResult<UserResponse> {
        self.resolve_user(access_token).await.map(UserResponse::from)
    }
}

fn unauthorized() -> ServiceError {
    ServiceError::App(AppError::Unauthorized)
}
