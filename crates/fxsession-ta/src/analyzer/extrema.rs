//! Extrema replacement - a session series whose high/low are rolling values.

use chrono::NaiveDateTime;
use fxsession_core::{BarSeries, HighLow};
use fxsession_indicators::{
    Indicator, IndicatorError, RollingExtrema, RollingExtremaConfig, RollingExtremaIndicator,
};

/// A session series after its raw high/low were replaced by rolling extrema.
///
/// Pivot runs, range statistics and Fibonacci levels are all computed from
/// this representation, never from the raw bars.
#[derive(Debug, Clone)]
pub struct ExtremaSeries {
    timestamps: Vec<NaiveDateTime>,
    extrema: RollingExtrema,
}

impl ExtremaSeries {
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn extrema(&self) -> &RollingExtrema {
        &self.extrema
    }

    pub fn period(&self) -> usize {
        self.extrema.period
    }
}

impl HighLow for ExtremaSeries {
    fn len(&self) -> usize {
        self.timestamps.len()
    }

    fn high_at(&self, index: usize) -> Option<f64> {
        self.extrema.high_at(index)
    }

    fn low_at(&self, index: usize) -> Option<f64> {
        self.extrema.low_at(index)
    }
}

/// Replace the high/low columns of `series` with their `period`-bar rolling
/// max/min. The input series is not modified.
pub fn replace_with_rolling_extrema(
    series: &BarSeries,
    period: usize,
) -> Result<ExtremaSeries, IndicatorError> {
    let extrema =
        RollingExtremaIndicator::new(RollingExtremaConfig { period }).calculate(series)?;
    Ok(ExtremaSeries {
        timestamps: series.timestamps(),
        extrema,
    })
}
