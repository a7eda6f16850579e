//! Errors raised while loading bar data.

use fxsession_core::SeriesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: malformed {column} value {value:?}")]
    MalformedPrice {
        line: u64,
        column: String,
        value: String,
    },
    #[error("none of the {rows_read} rows could be parsed into a bar")]
    NoValidRows { rows_read: usize },
    #[error(transparent)]
    Series(#[from] SeriesError),
}
