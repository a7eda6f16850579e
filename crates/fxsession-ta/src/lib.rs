//! Session technical analysis - per-session price statistics.
//!
//! This crate slices a bar series into recurring time-of-day sessions and
//! computes descriptive statistics for each one. It never decides trading
//! actions.
//!
//! # Core Concepts
//!
//! - **Sessions**: named time-of-day windows, possibly wrapping midnight
//! - **Extrema replacement**: raw high/low swapped for rolling max/min
//! - **Pivot runs**: bars between alternating changes of the rolling extrema
//! - **Range in pips**: mean rolling range scaled by 10,000
//! - **Fibonacci levels**: retracements between the rolling low and high
//!
//! # Architecture
//!
//! Sessions are independent. The analyzer filters the input once per session,
//! builds an immutable replaced series, and runs every statistic on it. One
//! rayon task per session; a failing session is reported, not propagated.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fxsession_ta::{Analyzer, AnalyzerConfig, SessionAnalyzer};
//!
//! let analyzer = SessionAnalyzer::new(AnalyzerConfig::default());
//! let report = analyzer.analyze(&series);
//!
//! for (name, result) in &report {
//!     println!("{}: avg pivot run {:.2}", name, result.average_pivot_run_length);
//! }
//! ```

pub mod analyzer;
pub mod error;
pub mod export;
pub mod types;

// Re-export main analyzer types
pub use analyzer::{
    analyze_session, average_range_pips, filter_session, replace_with_rolling_extrema, Analyzer,
    ExtremaSeries, SessionAnalyzer, SessionReport, SessionResult, SessionStatus, SessionSummary,
    PIP_SCALE,
};

pub use error::AnalysisError;

// Re-export core types
pub use types::{
    count_pivot_runs, default_sessions, AnalyzerConfig, ChangeDetection, PivotAnchor, PivotRun,
    PivotRunCounter, PivotRunSummary, SessionConfig, SessionParams,
};

// Re-export export types
pub use export::{write_fibonacci_csv, CsvExporter, ExportError, Exporter};
