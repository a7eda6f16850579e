//! Core types for session statistics.
//!
//! This crate provides the data model shared by every other crate:
//! - `Bar` - OHLCV bar keyed by a naive timestamp
//! - `BarSeries` - validated, strictly ascending bar sequence
//! - `TimeSeries` - index-aligned container for derived values
//! - `SessionWindow` - recurring time-of-day window, possibly wrapping midnight
//! - `HighLow` - read access to high/low columns that may be absent

pub mod bar;
pub mod error;
pub mod high_low;
pub mod series;
pub mod session;

pub use bar::Bar;
pub use error::SeriesError;
pub use high_low::HighLow;
pub use series::{BarSeries, TimeSeries};
pub use session::SessionWindow;
