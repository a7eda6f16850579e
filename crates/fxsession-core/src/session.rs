//! Recurring time-of-day session windows.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A half-open time-of-day window `[start, end)`.
///
/// When `end < start` the window wraps past midnight, so a time belongs to it
/// if it is at or after `start` or strictly before `end`. `start == end`
/// selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SessionWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Build a window from hour/minute pairs. Returns `None` for an invalid time.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start.0, start.1, 0)?,
            end: NaiveTime::from_hms_opt(end.0, end.1, 0)?,
        })
    }

    /// Returns true if the window crosses midnight.
    #[inline]
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Returns true if `time` falls inside the window.
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.wraps_midnight() {
            time >= self.start || time < self.end
        } else {
            self.start <= time && time < self.end
        }
    }
}

impl std::fmt::Display for SessionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
