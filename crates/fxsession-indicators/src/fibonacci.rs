//! Fibonacci retracement levels between a rolling low and rolling high.

use fxsession_core::{HighLow, TimeSeries};
use serde::Serialize;

use crate::indicator::{Indicator, IndicatorConfig, IndicatorError, DEFAULT_PERIOD};
use crate::rolling_extrema::rolling_extrema;

/// The five retracement fractions, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FibonacciRatio {
    R236,
    R382,
    R500,
    R618,
    R1000,
}

impl FibonacciRatio {
    /// All ratios in ascending order.
    pub const ALL: [FibonacciRatio; 5] = [
        FibonacciRatio::R236,
        FibonacciRatio::R382,
        FibonacciRatio::R500,
        FibonacciRatio::R618,
        FibonacciRatio::R1000,
    ];

    pub fn ratio(&self) -> f64 {
        match self {
            FibonacciRatio::R236 => 0.236,
            FibonacciRatio::R382 => 0.382,
            FibonacciRatio::R500 => 0.5,
            FibonacciRatio::R618 => 0.618,
            FibonacciRatio::R1000 => 1.0,
        }
    }

    /// Column label used in reports and exports.
    pub fn label(&self) -> &'static str {
        match self {
            FibonacciRatio::R236 => "Fibo 23.6%",
            FibonacciRatio::R382 => "Fibo 38.2%",
            FibonacciRatio::R500 => "Fibo 50.0%",
            FibonacciRatio::R618 => "Fibo 61.8%",
            FibonacciRatio::R1000 => "Fibo 100%",
        }
    }

    /// Price level for this ratio between `low` and `high`.
    ///
    /// The 100% level is `low + (high - low)` without the multiplication.
    #[inline]
    pub fn level(&self, low: f64, high: f64) -> f64 {
        match self {
            FibonacciRatio::R1000 => low + (high - low),
            _ => low + (high - low) * self.ratio(),
        }
    }
}

/// Five retracement series aligned index-for-index with the input.
///
/// An index is absent in all five series at once when the rolling pair is
/// absent there.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FibonacciLevels {
    pub fibo_236: TimeSeries<f64>,
    pub fibo_382: TimeSeries<f64>,
    pub fibo_500: TimeSeries<f64>,
    pub fibo_618: TimeSeries<f64>,
    pub fibo_100: TimeSeries<f64>,
}

impl FibonacciLevels {
    /// Build the levels from an already computed high/low pair.
    pub fn from_extrema<S: HighLow + ?Sized>(extrema: &S) -> Self {
        let n = extrema.len();
        let pairs: Vec<Option<(f64, f64)>> = (0..n).map(|i| extrema.high_low_at(i)).collect();
        let series_for = |ratio: FibonacciRatio| {
            TimeSeries::from_options(
                pairs
                    .iter()
                    .map(|pair| pair.map(|(high, low)| ratio.level(low, high)))
                    .collect(),
            )
        };

        Self {
            fibo_236: series_for(FibonacciRatio::R236),
            fibo_382: series_for(FibonacciRatio::R382),
            fibo_500: series_for(FibonacciRatio::R500),
            fibo_618: series_for(FibonacciRatio::R618),
            fibo_100: series_for(FibonacciRatio::R1000),
        }
    }

    pub fn level(&self, ratio: FibonacciRatio) -> &TimeSeries<f64> {
        match ratio {
            FibonacciRatio::R236 => &self.fibo_236,
            FibonacciRatio::R382 => &self.fibo_382,
            FibonacciRatio::R500 => &self.fibo_500,
            FibonacciRatio::R618 => &self.fibo_618,
            FibonacciRatio::R1000 => &self.fibo_100,
        }
    }

    /// Number of aligned slots (same for all five series).
    pub fn len(&self) -> usize {
        self.fibo_236.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fibo_236.is_empty()
    }
}

/// Compute retracement levels from a `period`-bar rolling high/low of `series`.
pub fn fibonacci_levels<S>(series: &S, period: usize) -> Result<FibonacciLevels, IndicatorError>
where
    S: HighLow + ?Sized,
{
    let extrema = rolling_extrema(series, period)?;
    Ok(FibonacciLevels::from_extrema(&extrema))
}

/// Fibonacci indicator configuration.
#[derive(Debug, Clone)]
pub struct FibonacciConfig {
    /// Rolling high/low lookback (default: 14).
    pub period: usize,
}

impl Default for FibonacciConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}

impl IndicatorConfig for FibonacciConfig {}

/// Fibonacci retracement indicator.
pub struct Fibonacci {
    config: FibonacciConfig,
}

impl Indicator for Fibonacci {
    type Config = FibonacciConfig;
    type Output = FibonacciLevels;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    fn calculate<S: HighLow + ?Sized>(&self, series: &S) -> Result<FibonacciLevels, IndicatorError> {
        fibonacci_levels(series, self.config.period)
    }
}
