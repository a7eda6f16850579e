//! Indicator framework for session statistics.

pub mod fibonacci;
pub mod indicator;
pub mod rolling_extrema;

pub use fibonacci::{fibonacci_levels, Fibonacci, FibonacciConfig, FibonacciLevels, FibonacciRatio};
pub use indicator::{
    check_period, Indicator, IndicatorConfig, IndicatorError, DEFAULT_PERIOD,
};
pub use rolling_extrema::{
    rolling_extrema, RollingExtrema, RollingExtremaConfig, RollingExtremaIndicator,
};
