//! Rolling extrema: trailing max-of-high and min-of-low.

use std::ops::RangeInclusive;

use fxsession_core::{HighLow, TimeSeries};
use serde::Serialize;

use crate::indicator::{check_period, Indicator, IndicatorConfig, IndicatorError, DEFAULT_PERIOD};

/// Rolling high/low aligned with the input series.
///
/// Index `i` is defined only when `i >= period - 1` and every input value in
/// `[i - period + 1, i]` is defined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingExtrema {
    pub period: usize,
    pub high: TimeSeries<f64>,
    pub low: TimeSeries<f64>,
}

impl RollingExtrema {
    /// Rolling extrema of an empty series.
    pub fn empty(period: usize) -> Self {
        Self {
            period,
            high: TimeSeries::new(),
            low: TimeSeries::new(),
        }
    }
}

impl HighLow for RollingExtrema {
    fn len(&self) -> usize {
        self.high.len()
    }

    fn high_at(&self, index: usize) -> Option<f64> {
        self.high.value(index)
    }

    fn low_at(&self, index: usize) -> Option<f64> {
        self.low.value(index)
    }
}

/// Compute the trailing `period`-bar max of highs and min of lows.
pub fn rolling_extrema<S>(series: &S, period: usize) -> Result<RollingExtrema, IndicatorError>
where
    S: HighLow + ?Sized,
{
    let period = check_period(period)?;
    let n = series.len();
    let mut high = Vec::with_capacity(n);
    let mut low = Vec::with_capacity(n);

    for i in 0..n {
        if i + 1 < period {
            high.push(None);
            low.push(None);
            continue;
        }
        let window = (i + 1 - period)..=i;
        high.push(window_extreme(window.clone(), |j| series.high_at(j), f64::max));
        low.push(window_extreme(window, |j| series.low_at(j), f64::min));
    }

    Ok(RollingExtrema {
        period,
        high: TimeSeries::from_options(high),
        low: TimeSeries::from_options(low),
    })
}

/// Fold a window with `pick`, or `None` if any value in it is absent.
fn window_extreme<F>(window: RangeInclusive<usize>, value: F, pick: fn(f64, f64) -> f64) -> Option<f64>
where
    F: Fn(usize) -> Option<f64>,
{
    let mut acc: Option<f64> = None;
    for j in window {
        let v = value(j)?;
        acc = Some(acc.map_or(v, |a| pick(a, v)));
    }
    acc
}

/// Rolling extrema indicator configuration.
#[derive(Debug, Clone)]
pub struct RollingExtremaConfig {
    /// Lookback period (default: 14).
    pub period: usize,
}

impl Default for RollingExtremaConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}

impl IndicatorConfig for RollingExtremaConfig {}

/// Rolling extrema exposed through the `Indicator` trait.
pub struct RollingExtremaIndicator {
    config: RollingExtremaConfig,
}

impl Indicator for RollingExtremaIndicator {
    type Config = RollingExtremaConfig;
    type Output = RollingExtrema;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn calculate<S: HighLow + ?Sized>(&self, series: &S) -> Result<RollingExtrema, IndicatorError> {
        rolling_extrema(series, self.config.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fxsession_core::{Bar, BarSeries};

    fn make_series(highs: &[f64], lows: &[f64]) -> BarSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bars = highs
            .iter()
            .zip(lows)
            .enumerate()
            .map(|(i, (&h, &l))| {
                let ts = start + chrono::Duration::minutes(i as i64);
                Bar::new(ts, l, h, l, h, 1.0)
            })
            .collect();
        BarSeries::new(bars).unwrap()
    }

    #[test]
    fn test_rolling_window_values() {
        let series = make_series(&[3.0, 5.0, 4.0, 2.0, 6.0], &[1.0, 0.5, 2.0, 1.5, 3.0]);
        let ext = rolling_extrema(&series, 3).unwrap();

        assert_eq!(ext.len(), 5);
        assert_eq!(ext.high_at(0), None);
        assert_eq!(ext.high_at(1), None);
        assert_eq!(ext.high_at(2), Some(5.0));
        assert_eq!(ext.high_at(3), Some(5.0));
        assert_eq!(ext.high_at(4), Some(6.0));
        assert_eq!(ext.low_at(2), Some(0.5));
        assert_eq!(ext.low_at(3), Some(0.5));
        assert_eq!(ext.low_at(4), Some(1.5));
    }

    #[test]
    fn test_period_one_is_identity() {
        let series = make_series(&[3.0, 5.0], &[1.0, 2.0]);
        let ext = rolling_extrema(&series, 1).unwrap();
        assert_eq!(ext.high_at(0), Some(3.0));
        assert_eq!(ext.low_at(1), Some(2.0));
    }

    #[test]
    fn test_matches_brute_force_max() {
        let highs: Vec<f64> = (0..40).map(|i| ((i * 7) % 11) as f64 * 0.001 + 1.1).collect();
        let lows: Vec<f64> = highs.iter().map(|h| h - 0.002).collect();
        let series = make_series(&highs, &lows);

        for period in [1, 2, 5, 14] {
            let ext = rolling_extrema(&series, period).unwrap();
            for i in (period - 1)..highs.len() {
                let window = &highs[i + 1 - period..=i];
                let expected = window.iter().cloned().fold(f64::MIN, f64::max);
                assert_eq!(ext.high_at(i), Some(expected));
            }
        }
    }

    #[test]
    fn test_short_series_is_all_absent() {
        let series = make_series(&[1.0, 2.0], &[0.5, 1.0]);
        let ext = rolling_extrema(&series, 14).unwrap();
        assert_eq!(ext.len(), 2);
        assert_eq!(ext.high.defined_count(), 0);
    }

    #[test]
    fn test_absent_inputs_propagate() {
        let series = make_series(&[3.0, 5.0, 4.0, 2.0, 6.0], &[1.0, 0.5, 2.0, 1.5, 3.0]);
        let first = rolling_extrema(&series, 2).unwrap();
        let second = rolling_extrema(&first, 2).unwrap();

        // first is defined from index 1, second needs two defined inputs
        assert_eq!(second.high_at(1), None);
        assert_eq!(second.high_at(2), Some(5.0));
        assert_eq!(second.low_at(4), Some(1.5));
    }

    #[test]
    fn test_zero_period_rejected() {
        let series = make_series(&[1.0], &[0.5]);
        assert_eq!(
            rolling_extrema(&series, 0).unwrap_err(),
            IndicatorError::InvalidPeriod(0)
        );
    }

    #[test]
    fn test_indicator_matches_function() {
        let series = make_series(&[3.0, 5.0, 4.0], &[1.0, 0.5, 2.0]);
        let indicator = RollingExtremaIndicator::new(RollingExtremaConfig { period: 2 });
        let out = indicator.calculate(&series).unwrap();

        assert_eq!(out, rolling_extrema(&series, 2).unwrap());
        assert_eq!(out.high_at(2), Some(5.0));
        assert_eq!(out.low_at(2), Some(0.5));

        let broken = RollingExtremaIndicator::new(RollingExtremaConfig { period: 0 });
        assert_eq!(
            broken.calculate(&series).unwrap_err(),
            IndicatorError::InvalidPeriod(0)
        );
    }
}
