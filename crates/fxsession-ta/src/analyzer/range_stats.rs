//! Range statistics - mean per-bar range in pips.

use fxsession_core::HighLow;

/// Price units per pip for four-decimal quotes.
pub const PIP_SCALE: f64 = 10_000.0;

/// Mean of `high - low` over indices where both are defined, in pips.
///
/// Returns `None` when no index has a defined range (empty series or
/// not enough history), which callers should show as "no data".
pub fn average_range_pips<S>(series: &S) -> Option<f64>
where
    S: HighLow + ?Sized,
{
    let (sum, count) = (0..series.len())
        .filter_map(|i| series.high_low_at(i))
        .fold((0.0, 0usize), |(sum, count), (high, low)| {
            (sum + (high - low), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(sum / count as f64 * PIP_SCALE)
    }
}
