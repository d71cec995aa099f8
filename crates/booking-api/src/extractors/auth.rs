//! Authentication extractor
//!
//! Resolves the bearer token in the Authorization header to a stored user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use booking_core::{User, UserId};
use booking_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Id of the token subject
    pub user_id: UserId,
    /// The user as currently stored
    pub user: User,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        // Every resolution failure surfaces as the same Unauthorized error
        let user = AuthService::new(app_state.service_context())
            .resolve_user(bearer.token())
            .await?;

        Ok(Self {
            user_id: user.id,
            user,
        })
    }
}
