//! Per-session analysis results.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use fxsession_core::SessionWindow;
use fxsession_indicators::FibonacciLevels;
use serde::Serialize;

use crate::types::PivotRun;

/// Outcome of analyzing one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionStatus {
    /// Statistics were computed (some may still be undefined for short sessions).
    Analyzed,
    /// The window matched no bars.
    Empty,
    /// Analysis of this session failed. Other sessions are unaffected.
    Failed { reason: String },
}

/// Result bundle for one named session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResult {
    pub name: String,
    pub window: SessionWindow,
    pub status: SessionStatus,
    /// Bars that fell inside the window.
    pub bar_count: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub pivot_runs: Vec<PivotRun>,
    /// Mean pivot run length in bars, 0 when no run completed.
    pub average_pivot_run_length: f64,
    /// Mean rolling range in pips, `None` when undefined.
    pub average_range_pips: Option<f64>,
    /// Timestamps the Fibonacci series are aligned to.
    pub timestamps: Vec<NaiveDateTime>,
    pub fibonacci: FibonacciLevels,
}

impl SessionResult {
    /// A result with zeroed/undefined statistics.
    pub fn no_data(name: impl Into<String>, window: SessionWindow, status: SessionStatus) -> Self {
        Self {
            name: name.into(),
            window,
            status,
            bar_count: 0,
            first_timestamp: None,
            last_timestamp: None,
            pivot_runs: Vec::new(),
            average_pivot_run_length: 0.0,
            average_range_pips: None,
            timestamps: Vec::new(),
            fibonacci: FibonacciLevels::default(),
        }
    }

    /// Returns true if any statistic is defined for this session.
    pub fn has_data(&self) -> bool {
        self.status == SessionStatus::Analyzed && self.average_range_pips.is_some()
    }

    /// Scalar view without the aligned series.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            name: self.name.clone(),
            window: self.window.to_string(),
            status: self.status.clone(),
            bar_count: self.bar_count,
            first_timestamp: self.first_timestamp,
            last_timestamp: self.last_timestamp,
            pivot_run_count: self.pivot_runs.len(),
            average_pivot_run_length: self.average_pivot_run_length,
            average_range_pips: self.average_range_pips,
        }
    }
}

/// Scalar statistics of a session, for tabular or JSON reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub name: String,
    pub window: String,
    #[serde(flatten)]
    pub status: SessionStatus,
    pub bar_count: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub pivot_run_count: usize,
    pub average_pivot_run_length: f64,
    pub average_range_pips: Option<f64>,
}

/// Results keyed by session name.
pub type SessionReport = BTreeMap<String, SessionResult>;
