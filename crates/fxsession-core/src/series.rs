//! Series containers: validated bar input and index-aligned derived values.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::bar::Bar;
use crate::error::SeriesError;
use crate::high_low::HighLow;

/// A series of optional values aligned index-for-index with the bars it was
/// derived from. `None` marks an index without enough history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries<T> {
    values: Vec<Option<T>>,
}

impl<T> TimeSeries<T> {
    /// Creates a new empty TimeSeries.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Creates a TimeSeries from already aligned optional values.
    pub fn from_options(values: Vec<Option<T>>) -> Self {
        Self { values }
    }

    /// Returns the number of aligned slots, defined or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this series has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the value at the given bar index, if defined.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index).and_then(|v| v.as_ref())
    }

    /// Returns an iterator over defined (index, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().map(|val| (i, val)))
    }

    /// Index of the first defined value.
    pub fn first_defined_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }

    /// Number of defined values.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Returns the underlying values slice.
    pub fn values(&self) -> &[Option<T>] {
        &self.values
    }
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> TimeSeries<T> {
    /// Gets a copy of the value at the given bar index, if defined.
    pub fn value(&self, index: usize) -> Option<T> {
        self.values.get(index).copied().flatten()
    }
}

impl<T: Clone> TimeSeries<T> {
    /// Creates a TimeSeries from a slice of values, all present.
    pub fn from_values(values: &[T]) -> Self {
        Self {
            values: values.iter().cloned().map(Some).collect(),
        }
    }
}

/// Validated bar sequence: strictly ascending timestamps, no duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series, rejecting out-of-order or duplicate timestamps.
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if let Some(pos) = bars
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(SeriesError::NotAscending {
                index: pos + 1,
                timestamp: bars[pos + 1].timestamp,
            });
        }
        Ok(Self { bars })
    }

    pub fn empty() -> Self {
        Self { bars: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    /// Returns a new series holding the bars matching `predicate`.
    ///
    /// A subsequence of an ascending series is still ascending, so no
    /// re-validation is needed. `self` is left untouched.
    pub fn select<F>(&self, mut predicate: F) -> BarSeries
    where
        F: FnMut(&Bar) -> bool,
    {
        BarSeries {
            bars: self.bars.iter().filter(|b| predicate(b)).copied().collect(),
        }
    }
}

impl HighLow for BarSeries {
    fn len(&self) -> usize {
        self.bars.len()
    }

    fn high_at(&self, index: usize) -> Option<f64> {
        self.bars.get(index).map(|b| b.high)
    }

    fn low_at(&self, index: usize) -> Option<f64> {
        self.bars.get(index).map(|b| b.low)
    }
}

impl<'a> IntoIterator for &'a BarSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar_at(minute: u32) -> Bar {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap();
        Bar::new(ts, 1.0, 1.1, 0.9, 1.05, 100.0)
    }

    #[test]
    fn test_bar_series_accepts_ascending() {
        let series = BarSeries::new(vec![bar_at(0), bar_at(1), bar_at(5)]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.high_at(2), Some(1.1));
        assert_eq!(series.high_at(3), None);
    }

    #[test]
    fn test_bar_series_rejects_duplicate() {
        let err = BarSeries::new(vec![bar_at(0), bar_at(1), bar_at(1)]).unwrap_err();
        assert!(matches!(err, SeriesError::NotAscending { index: 2, .. }));
    }

    #[test]
    fn test_bar_series_rejects_descending() {
        let err = BarSeries::new(vec![bar_at(3), bar_at(2)]).unwrap_err();
        assert!(matches!(err, SeriesError::NotAscending { index: 1, .. }));
    }

    #[test]
    fn test_select_leaves_source_untouched() {
        let series = BarSeries::new(vec![bar_at(0), bar_at(1), bar_at(2)]).unwrap();
        let odd = series.select(|b| b.timestamp.format("%M").to_string() == "01");
        assert_eq!(odd.len(), 1);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_time_series_alignment() {
        let ts = TimeSeries::from_options(vec![None, None, Some(2.0), Some(3.0)]);
        assert_eq!(ts.len(), 4);
        assert_eq!(ts.get(1), None);
        assert_eq!(ts.value(2), Some(2.0));
        assert_eq!(ts.first_defined_index(), Some(2));
        assert_eq!(ts.defined_count(), 2);

        let pairs: Vec<_> = ts.iter().map(|(i, v)| (i, *v)).collect();
        assert_eq!(pairs, vec![(2, 2.0), (3, 3.0)]);
    }

    #[test]
    fn test_time_series_from_values() {
        let ts = TimeSeries::from_values(&[1.0, 2.0]);
        assert_eq!(ts.defined_count(), 2);
        assert_eq!(ts.first_defined_index(), Some(0));
    }
}
