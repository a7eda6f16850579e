//! Data loading utilities for fxsession.

pub mod csv;
pub mod error;
pub mod gaps;
pub mod source;
pub mod validation;

pub use self::csv::{load_bars_from_csv, parse_bars, parse_datetime, CsvLoader, LoadSummary};
pub use error::DataError;
pub use gaps::{analyze_gaps, Gap, GapReport};
pub use source::DataSource;
pub use validation::validate_bar;
