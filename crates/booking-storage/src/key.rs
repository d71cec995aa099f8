//! Object key checks shared by the stores

use crate::error::StorageError;

/// Accept keys made of `[A-Za-z0-9._-]` segments joined by `/`
///
/// Empty, `.` and `..` segments are refused so a key can never leave the
/// store root.
pub fn validate_object_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        });

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
