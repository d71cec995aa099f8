//! User entity - represents an account that books records and owns queues

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User account
///
/// The password hash is deliberately not part of the entity; repositories
/// store and return it separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub login: String,
    pub email: String,
    pub email_notifications: bool,
    pub telegram_login: Option<String>,
    pub telegram_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with notifications switched off
    pub fn new(id: UserId, login: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            login,
            email,
            email_notifications: false,
            telegram_login: None,
            telegram_notifications: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether a telegram handle is linked
    #[inline]
    pub fn has_telegram(&self) -> bool {
        self.telegram_login.is_some()
    }

    /// Update the login
    pub fn set_login(&mut self, login: String) {
        self.login = login;
        self.updated_at = Utc::now();
    }

    /// Update the email address and optionally its notification flag
    pub fn set_email(&mut self, email: String, notifications: Option<bool>) {
        self.email = email;
        if let Some(flag) = notifications {
            self.email_notifications = flag;
        }
        self.updated_at = Utc::now();
    }

    /// Link a telegram handle and optionally change its notification flag
    pub fn set_telegram(&mut self, telegram_login: Option<String>, notifications: Option<bool>) {
        self.telegram_login = telegram_login;
        if let Some(flag) = notifications {
            self.telegram_notifications = flag;
        }
        self.updated_at = Utc::now();
    }

    /// Update notification preferences
    pub fn set_notifications(&mut self, email: Option<bool>, telegram: Option<bool>) {
        if let Some(flag) = email {
            self.email_notifications = flag;
        }
        if let Some(flag) = telegram {
            self.telegram_notifications = flag;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            UserId::new(),
            "manager".to_string(),
            "manager@example.com".to_string(),
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = user();
        assert!(!user.email_notifications);
        assert!(!user.telegram_notifications);
        assert!(!user.has_telegram());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_set_email_keeps_flag_when_not_given() {
        let mut user = user();
        user.email_notifications = true;
        user.set_email("other@example.com".to_string(), None);
        assert_eq!(user.email, "other@example.com");
        assert!(user.email_notifications);

        user.set_email("third@example.com".to_string(), Some(false));
        assert!(!user.email_notifications);
    }

    #[test]
    fn test_set_telegram() {
        let mut user = user();
        user.set_telegram(Some("@manager".to_string()), Some(true));
        assert!(user.has_telegram());
        assert!(user.telegram_notifications);
        assert!(user.updated_at >= user.created_at);
    }
}
