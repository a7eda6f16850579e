//! Data source trait definition.

use fxsession_core::BarSeries;

/// Trait for types that can load bar data.
///
/// This trait uses `anyhow::Result` for flexible error handling.
pub trait DataSource {
    fn load(&self) -> anyhow::Result<BarSeries>;
}
