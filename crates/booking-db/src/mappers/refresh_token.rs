//! Refresh token entity <-> model mapper

use booking_core::entities::RefreshToken;
use booking_core::value_objects::{RefreshTokenId, UserId};

use crate::models::RefreshTokenModel;

impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            id: RefreshTokenId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            token_hash: model.token_hash,
            created_at: model.created_at,
            expires_at: model.expires_at,
            revoked: model.revoked,
        }
    }
}
