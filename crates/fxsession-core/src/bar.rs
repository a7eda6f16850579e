//! Bar data structure for OHLCV data.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Time of day of this bar, used for session membership.
    #[inline]
    pub fn time_of_day(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Raw bar range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if every price and the volume are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_time_of_day() {
        let bar = Bar::new(ts(23, 30), 1.1, 1.2, 1.0, 1.15, 10.0);
        assert_eq!(bar.time_of_day(), NaiveTime::from_hms_opt(23, 30, 0).unwrap());
    }

    #[test]
    fn test_range_and_finite() {
        let bar = Bar::new(ts(8, 30), 1.25, 1.5, 1.25, 1.5, 0.0);
        assert_eq!(bar.range(), 0.25);
        assert!(bar.is_finite());

        let bad = Bar::new(ts(8, 30), f64::NAN, 1.5, 1.25, 1.5, 0.0);
        assert!(!bad.is_finite());
    }
}
