//! Attachment entity - metadata of a file stored in the blob store

use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::{AttachmentId, RecordId};

/// File attached to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: AttachmentId,
    pub record_id: RecordId,
    /// Key of the object in the blob store, unique
    pub object_key: String,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Create attachment metadata for an uploaded object
    #[must_use]
    pub fn new(
        id: AttachmentId,
        record_id: RecordId,
        object_key: String,
        original_filename: String,
        content_type: String,
        size_bytes: i64,
    ) -> Self {
        Self {
            id,
            record_id,
            object_key,
            original_filename,
            content_type,
            size_bytes,
            created_at: Utc::now(),
        }
    }

    /// Generate a fresh object key: `<record_id>/<random uuid>.<ext>`
    ///
    /// The extension is taken from the original filename and lower-cased;
    /// it is omitted when the filename has none.
    #[must_use]
    pub fn object_key_for(record_id: RecordId, filename: &str) -> String {
        let name = Uuid::new_v4();
        match file_extension(filename) {
            Some(ext) => format!("{record_id}/{name}.{ext}"),
            None => format!("{record_id}/{name}"),
        }
    }
}

fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
}
