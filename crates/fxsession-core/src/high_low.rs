//! Read access to high/low columns.

use crate::bar::Bar;

/// Trait for index-addressable high/low data.
///
/// Raw bars always have both values. Derived series (such as rolling
/// extrema) return `None` where there is not enough history yet, and
/// consumers must treat that as missing rather than zero.
pub trait HighLow {
    /// Number of indices, defined or not.
    fn len(&self) -> usize;

    fn high_at(&self, index: usize) -> Option<f64>;

    fn low_at(&self, index: usize) -> Option<f64>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both values at `index`, if both are defined.
    fn high_low_at(&self, index: usize) -> Option<(f64, f64)> {
        Some((self.high_at(index)?, self.low_at(index)?))
    }
}

impl HighLow for [Bar] {
    fn len(&self) -> usize {
        <[Bar]>::len(self)
    }

    fn high_at(&self, index: usize) -> Option<f64> {
        self.get(index).map(|b| b.high)
    }

    fn low_at(&self, index: usize) -> Option<f64> {
        self.get(index).map(|b| b.low)
    }
}
