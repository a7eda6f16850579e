//! Validation utilities for loaded bars.

use fxsession_core::Bar;

/// Validate a bar has reasonable values.
///
/// Prices must be finite and positive, the high must bound open/close from
/// above and the low from below, and volume must not be negative.
pub fn validate_bar(bar: &Bar) -> bool {
    bar.is_finite()
        && bar.high >= bar.low
        && bar.high >= bar.open.max(bar.close)
        && bar.low <= bar.open.min(bar.close)
        && bar.low > 0.0
        && bar.volume >= 0.0
}
