//! User service
//!
//! Profile reads and self-service account changes.

use booking_common::AppError;
use booking_core::entities::User;
use booking_core::error::DomainError;
use booking_core::value_objects::UserId;
use tracing::{info, instrument, warn};

use crate::dto::{
    ChangePasswordRequest, UpdateEmailRequest, UpdateTelegramRequest, UpdateUserRequest,
    UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id).into())
    }

    /// Get a user by id
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        self.load(user_id).await.map(UserResponse::from)
    }

    /// Get a user by login
    #[instrument(skip(self))]
    pub async fn get_user_by_login(&self, login: &str) -> ServiceResult<UserResponse> {
        self.ctx
            .user_repo()
            .find_by_login(login)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ServiceError::not_found("User", login))
    }

    /// List all users
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.user_repo().find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Apply a partial profile update to the acting user
    #[instrument(skip(self, request), fields(user_id = %acting))]
    pub async fn update_profile(
        &self,
        acting: UserId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load(acting).await?;

        if let Some(login) = request.login {
            user.set_login(login);
        }
        if let Some(email) = request.email {
            user.set_email(email, None);
        }
        if let Some(telegram_login) = request.telegram_login {
            user.set_telegram(Some(telegram_login), None);
        }
        user.set_notifications(request.email_notifications, request.telegram_notifications);

        self.ctx.user_repo().update(&user).await?;
        info!("Profile updated");
        Ok(user.into())
    }

    /// Change the acting user's email
    #[instrument(skip(self, request), fields(user_id = %acting))]
    pub async fn update_email(
        &self,
        acting: UserId,
        request: UpdateEmailRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load(acting).await?;
        user.set_email(request.email, request.email_notifications);
        self.ctx.user_repo().update(&user).await?;
        info!("Email updated");
        Ok(user.into())
    }

    /// Link a telegram handle to the acting user
    #[instrument(skip(self, request), fields(user_id = %acting))]
    pub async fn update_telegram(
        &self,
        acting: UserId,
        request: UpdateTelegramRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load(acting).await?;
        user.set_telegram(Some(request.telegram_login), request.telegram_notifications);
        self.ctx.user_repo().update(&user).await?;
        info!("Telegram login updated");
        Ok(user.into())
    }

    /// Change the acting user's password and end all their sessions
    #[instrument(skip(self, request), fields(user_id = %acting))]
    pub async fn change_password(
        &self,
        acting: UserId,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let Some(current_hash) = self.ctx.user_repo().get_password_hash(acting).await? else {
            return Err(DomainError::UserNotFound(acting).into());
        };

        let passwords = self.ctx.password_service();
        if !passwords.verify(&request.current_password, &current_hash)? {
            warn!("Password change failed: current password mismatch");
            return Err(AppError::InvalidCredentials.into());
        }

        let new_hash = passwords.hash(&request.new_password)?;
        self.ctx.user_repo().update_password(acting, &new_hash).await?;

        let revoked = self
            .ctx
            .refresh_token_repo()
            .revoke_all_for_user(acting)
            .await?;
        info!(revoked, "Password changed, sessions revoked");
        Ok(())
    }

    /// Delete the acting user along with everything they own
    ///
    /// Attachment blobs go first, then the rows in one cascade.
    #[instrument(skip(self), fields(user_id = %acting))]
    pub async fn delete_user(&self, acting: UserId) -> ServiceResult<()> {
        self.load(acting).await?;

        let attachments = self.ctx.attachment_repo().find_owned_by_user(acting).await?;
        for attachment in &attachments {
            self.ctx.blob_store().delete(&attachment.object_key).await?;
        }

        self.ctx.user_repo().delete(acting).await?;
        info!(attachments = attachments.len(), "User deleted");
        Ok(())
    }
}
