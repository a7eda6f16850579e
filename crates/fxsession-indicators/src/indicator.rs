//! Core indicator traits and types.

use fxsession_core::HighLow;
use thiserror::Error;

/// Default lookback shared by the rolling extrema and Fibonacci indicators.
pub const DEFAULT_PERIOD: usize = 14;

/// Indicator errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("indicator period must be at least 1, got {0}")]
    InvalidPeriod(usize),
}

/// Reject a zero lookback.
pub fn check_period(period: usize) -> Result<usize, IndicatorError> {
    if period == 0 {
        Err(IndicatorError::InvalidPeriod(period))
    } else {
        Ok(period)
    }
}

/// Trait for indicator configuration.
pub trait IndicatorConfig: Clone + Default {}

/// Trait for indicators computed from high/low data.
pub trait Indicator {
    /// The configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Values produced, aligned index-for-index with the input.
    type Output;

    /// Create a new indicator with the given configuration.
    fn new(config: Self::Config) -> Self;

    /// Calculate the indicator values, aligned with `series`.
    fn calculate<S: HighLow + ?Sized>(&self, series: &S) -> Result<Self::Output, IndicatorError>;
}
