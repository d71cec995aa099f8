//! Open time interval used for booking collision checks

use chrono::{DateTime, Duration, Utc};

/// Open interval `(start, end)`: both bounds are excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window from explicit bounds
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window of `radius` on both sides of `center`
    #[must_use]
    pub fn around(center: DateTime<Utc>, radius: Duration) -> Self {
        Self {
            start: center - radius,
            end: center + radius,
        }
    }

    /// Check whether `instant` lies strictly inside the window
    #[inline]
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant < self.end
    }
}
