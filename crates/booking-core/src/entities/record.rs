//! Record entity - a booking request against a queue

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{QueueId, RecordId, UserId};

/// Urgency level of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    /// Storage / wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            other => Err(format!("unknown urgency level: {other}")),
        }
    }
}

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
}

impl RecordStatus {
    /// Storage / wire representation
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown record status: {other}")),
        }
    }
}

/// Booking record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    /// Requesting user (not the owner of the queue)
    pub user_id: UserId,
    pub queue_id: QueueId,
    pub purpose: String,
    pub meeting_datetime: DateTime<Utc>,
    pub urgency: Urgency,
    pub status: RecordStatus,
    pub manager_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Create a new pending record
    #[must_use]
    pub fn new(
        id: RecordId,
        user_id: UserId,
        queue_id: QueueId,
        purpose: String,
        meeting_datetime: DateTime<Utc>,
        urgency: Urgency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            queue_id,
            purpose,
            meeting_datetime,
            urgency,
            status: RecordStatus::Pending,
            manager_comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the given user requested this record
    #[inline]
    #[must_use]
    pub fn is_requested_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn set_purpose(&mut self, purpose: String) {
        self.purpose = purpose;
        self.updated_at = Utc::now();
    }

    pub fn set_meeting_datetime(&mut self, meeting: DateTime<Utc>) {
        self.meeting_datetime = meeting;
        self.updated_at = Utc::now();
    }

    pub fn set_urgency(&mut self, urgency: Urgency) {
        self.urgency = urgency;
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    pub fn set_manager_comment(&mut self, comment: Option<String>) {
        self.manager_comment = comment;
        self.updated_at = Utc::now();
    }
}
