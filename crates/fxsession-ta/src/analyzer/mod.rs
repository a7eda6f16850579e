//! Analyzer module for session statistics.
//!
//! Every configured session is processed independently:
//! 1. Filter: keep the bars inside the session window
//! 2. Extrema replacement: swap raw high/low for rolling max/min
//! 3. Statistics: pivot runs, mean range in pips and Fibonacci levels, all
//!    computed from the replaced series

mod extrema;
mod range_stats;
mod result;
mod session_filter;

pub use extrema::{replace_with_rolling_extrema, ExtremaSeries};
pub use range_stats::{average_range_pips, PIP_SCALE};
pub use result::{SessionReport, SessionResult, SessionStatus, SessionSummary};
pub use session_filter::filter_session;

use fxsession_core::BarSeries;
use fxsession_indicators::{Fibonacci, FibonacciConfig, Indicator};
use log::{debug, warn};
use rayon::prelude::*;

use crate::error::AnalysisError;
use crate::types::{count_pivot_runs, AnalyzerConfig, SessionConfig};

/// Trait for session analysis algorithms.
pub trait Analyzer: Send + Sync {
    /// Analyze every configured session of `series`.
    fn analyze(&self, series: &BarSeries) -> SessionReport;

    /// Get the configuration.
    fn config(&self) -> &AnalyzerConfig;
}

/// Default analyzer: one rayon task per session, no shared mutable state.
pub struct SessionAnalyzer {
    config: AnalyzerConfig,
}

impl SessionAnalyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }
}

impl Default for SessionAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl Analyzer for SessionAnalyzer {
    fn analyze(&self, series: &BarSeries) -> SessionReport {
        self.config
            .sessions
            .par_iter()
            .map(|session| (session.name.clone(), analyze_session(series, session)))
            .collect()
    }

    fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

/// Analyze a single session. Failures are reported in the result status
/// instead of being propagated.
pub fn analyze_session(series: &BarSeries, session: &SessionConfig) -> SessionResult {
    let filtered = filter_session(series, &session.window);
    if filtered.is_empty() {
        debug!("session {} {}: no bars", session.name, session.window);
        return SessionResult::no_data(&session.name, session.window, SessionStatus::Empty);
    }

    match compute_statistics(&filtered, session) {
        Ok(result) => result,
        Err(e) => {
            warn!("session {} failed: {}", session.name, e);
            let mut result = SessionResult::no_data(
                &session.name,
                session.window,
                SessionStatus::Failed {
                    reason: e.to_string(),
                },
            );
            result.bar_count = filtered.len();
            result
        }
    }
}

fn compute_statistics(
    filtered: &BarSeries,
    session: &SessionConfig,
) -> Result<SessionResult, AnalysisError> {
    let params = &session.params;

    let replaced = replace_with_rolling_extrema(filtered, params.extrema_period)?;
    let pivots = count_pivot_runs(&replaced, params.change_detection);
    let average_range_pips = average_range_pips(&replaced);
    let fibonacci = Fibonacci::new(FibonacciConfig {
        period: params.fibonacci_period,
    })
    .calculate(&replaced)?;

    debug!(
        "session {}: {} bars, {} pivot runs (avg {:.2}), {} fibonacci points",
        session.name,
        filtered.len(),
        pivots.runs.len(),
        pivots.average,
        fibonacci.fibo_100.defined_count(),
    );

    Ok(SessionResult {
        name: session.name.clone(),
        window: session.window,
        status: SessionStatus::Analyzed,
        bar_count: filtered.len(),
        first_timestamp: filtered.first().map(|b| b.timestamp),
        last_timestamp: filtered.last().map(|b| b.timestamp),
        pivot_runs: pivots.runs,
        average_pivot_run_length: pivots.average,
        average_range_pips,
        timestamps: replaced.timestamps().to_vec(),
        fibonacci,
    })
}
