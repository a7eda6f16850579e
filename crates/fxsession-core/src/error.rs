//! Errors raised while building core containers.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Series construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("bar {index} at {timestamp} is not after the previous bar")]
    NotAscending {
        index: usize,
        timestamp: NaiveDateTime,
    },
}
