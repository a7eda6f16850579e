//! Core types for session analysis.

pub mod config;
pub mod pivot;

pub use config::{default_sessions, AnalyzerConfig, ChangeDetection, SessionConfig, SessionParams};
pub use pivot::{count_pivot_runs, PivotAnchor, PivotRun, PivotRunCounter, PivotRunSummary};
