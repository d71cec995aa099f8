//! User entity <-> model mapper

use booking_core::entities::User;
use booking_core::value_objects::UserId;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::from_uuid(model.id),
            login: model.login,
            email: model.email,
            email_notifications: model.email_notifications,
            telegram_login: model.telegram_login,
            telegram_notifications: model.telegram_notifications,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
