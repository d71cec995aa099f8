//! Queue entity - a named booking channel owned by one user

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;
use crate::value_objects::{QueueId, TimeWindow, UserId};

/// Queue entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    pub owner_id: UserId,
    /// Retention period for stale records (informational, no job enforces it)
    pub cleanup_interval: Duration,
    /// Minimum spacing between the meeting times of any two records
    pub record_interval: Duration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Queue {
    /// Create a new queue with default intervals
    #[must_use]
    pub fn new(id: QueueId, name: String, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            owner_id,
            cleanup_interval: Self::default_cleanup_interval(),
            record_interval: Self::default_record_interval(),
            created_at: now,
            updated_at: now,
        }
    }

    /// One day
    #[must_use]
    pub fn default_cleanup_interval() -> Duration {
        Duration::days(1)
    }

    /// Thirty minutes
    #[must_use]
    pub fn default_record_interval() -> Duration {
        Duration::minutes(30)
    }

    /// Check if the given user owns this queue
    #[inline]
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// The open window around `meeting` in which no other record may be scheduled
    #[must_use]
    pub fn collision_window(&self, meeting: DateTime<Utc>) -> TimeWindow {
        TimeWindow::around(meeting, self.record_interval)
    }

    /// Update the queue name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the cleanup interval
    pub fn set_cleanup_interval(&mut self, interval: Duration) -> Result<(), DomainError> {
        ensure_positive(interval, "cleanup_interval")?;
        self.cleanup_interval = interval;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Update the record spacing interval
    pub fn set_record_interval(&mut self, interval: Duration) -> Result<(), DomainError> {
        ensure_positive(interval, "record_interval")?;
        self.record_interval = interval;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn ensure_positive(interval: Duration, field: &'static str) -> Result<(), DomainError> {
    if interval <= Duration::zero() {
        return Err(DomainError::InvalidInterval(field));
    }
    Ok(())
}
