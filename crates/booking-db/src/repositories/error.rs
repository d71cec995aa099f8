//! Error handling utilities for repositories

use booking_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation to the error of the constraint that was hit
///
/// Constraint names come from the schema migration.
pub fn map_unique_violation(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if let Some(error) = db_err.constraint().and_then(constraint_error) {
                return error;
            }
        }
    }
    map_db_error(e)
}

fn constraint_error(constraint: &str) -> Option<DomainError> {
    match constraint {
        "users_login_key" => Some(DomainError::DuplicateLogin),
        "users_email_key" => Some(DomainError::DuplicateEmail),
        "users_telegram_login_key" => Some(DomainError::DuplicateTelegramLogin),
        "queues_name_key" => Some(DomainError::DuplicateQueueName),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_names() {
        assert!(matches!(
            constraint_error("users_login_key"),
            Some(DomainError::DuplicateLogin)
        ));
        assert!(matches!(
            constraint_error("users_email_key"),
            Some(DomainError::DuplicateEmail)
        ));
        assert!(matches!(
            constraint_error("users_telegram_login_key"),
            Some(DomainError::DuplicateTelegramLogin)
        ));
        assert!(matches!(
            constraint_error("queues_name_key"),
            Some(DomainError::DuplicateQueueName)
        ));
        assert!(constraint_error("attachments_object_key_key").is_none());
    }
}
