//! Error types for session analysis.

use fxsession_indicators::IndicatorError;
use thiserror::Error;

/// Errors that can occur while analyzing a session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("indicator error: {0}")]
    Indicator(#[from] IndicatorError),
}
