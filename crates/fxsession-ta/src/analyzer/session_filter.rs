//! Session filter - slice a bar series by time of day.

use fxsession_core::{BarSeries, SessionWindow};

/// Return the bars of `series` whose time of day falls inside `window`.
///
/// Order and spacing of the surviving bars are preserved and nothing is
/// resampled. A window that matches no bar yields an empty series.
pub fn filter_session(series: &BarSeries, window: &SessionWindow) -> BarSeries {
    series.select(|bar| window.contains(bar.time_of_day()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, Timelike};
    use fxsession_core::Bar;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn series(times: &[NaiveDateTime]) -> BarSeries {
        BarSeries::new(
            times
                .iter()
                .map(|&t| Bar::new(t, 1.0, 1.1, 0.9, 1.0, 1.0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_york_wraps_midnight() {
        let s = series(&[at(1, 10, 0), at(1, 23, 30), at(2, 1, 30), at(2, 2, 0)]);
        let ny = SessionWindow::from_hm((21, 0), (2, 0)).unwrap();
        let filtered = filter_session(&s, &ny);

        let hours: Vec<u32> = filtered.iter().map(|b| b.timestamp.hour()).collect();
        assert_eq!(hours, vec![23, 1]);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_tokyo_keeps_order() {
        let s = series(&[
            at(1, 8, 0),
            at(1, 8, 30),
            at(1, 12, 0),
            at(1, 15, 0),
            at(2, 9, 0),
        ]);
        let tokyo = SessionWindow::from_hm((8, 30), (15, 0)).unwrap();
        let filtered = filter_session(&s, &tokyo);

        assert_eq!(
            filtered.timestamps(),
            vec![at(1, 8, 30), at(1, 12, 0), at(2, 9, 0)]
        );
    }

    #[test]
    fn test_no_matching_bars() {
        let s = series(&[at(1, 3, 0), at(1, 4, 0)]);
        let europe = SessionWindow::from_hm((15, 0), (21, 0)).unwrap();
        assert!(filter_session(&s, &europe).is_empty());
    }
}
