//! Gap analysis for loaded bar series.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use fxsession_core::BarSeries;
use log::info;

/// A stretch between two consecutive bars longer than the expected interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    /// Timestamp of the bar before the gap.
    pub start: NaiveDateTime,
    pub seconds: i64,
}

/// Coverage statistics of a series.
#[derive(Debug, Clone, PartialEq)]
pub struct GapReport {
    pub total_bars: usize,
    /// Most common spacing between consecutive bars.
    pub expected_interval_secs: i64,
    pub gap_count: usize,
    pub missing_bars: i64,
    pub largest_gap: Option<Gap>,
    /// Seconds between the first and last bar.
    pub span_secs: i64,
    /// Bars present relative to bars expected over the covered span.
    pub coverage_pct: f64,
}

impl GapReport {
    /// Log the report at info level.
    pub fn log(&self) {
        info!(
            "{} bars over {:.1} days, expected interval {}s, {} gaps, {} missing bars ({:.2}% coverage)",
            self.total_bars,
            self.span_secs as f64 / 86400.0,
            self.expected_interval_secs,
            self.gap_count,
            self.missing_bars,
            self.coverage_pct,
        );
        if let Some(gap) = self.largest_gap {
            info!(
                "largest gap: {}s ({:.1} hours) after {}",
                gap.seconds,
                gap.seconds as f64 / 3600.0,
                gap.start
            );
        }
    }
}

/// Analyze a series for gaps and missing bars.
///
/// Returns `None` when fewer than two bars are available.
pub fn analyze_gaps(series: &BarSeries) -> Option<GapReport> {
    if series.len() < 2 {
        return None;
    }

    let diffs: Vec<(NaiveDateTime, i64)> = series
        .bars()
        .windows(2)
        .map(|w| (w[0].timestamp, (w[1].timestamp - w[0].timestamp).num_seconds()))
        .collect();

    let mut intervals: HashMap<i64, usize> = HashMap::new();
    for &(_, diff) in &diffs {
        *intervals.entry(diff).or_insert(0) += 1;
    }
    // Ties go to the shorter interval
    let expected = intervals
        .iter()
        .max_by_key(|&(interval, count)| (*count, Reverse(*interval)))
        .map(|(&interval, _)| interval)
        .filter(|&interval| interval > 0)?;

    let mut gap_count = 0;
    let mut missing_bars = 0;
    let mut largest_gap: Option<Gap> = None;

    for &(start, diff) in &diffs {
        if diff > expected {
            gap_count += 1;
            missing_bars += diff / expected - 1;
            if largest_gap.map_or(true, |g| diff > g.seconds) {
                largest_gap = Some(Gap {
                    start,
                    seconds: diff,
                });
            }
        }
    }

    let span_secs = diffs.iter().map(|&(_, d)| d).sum::<i64>();
    let expected_bars = span_secs / expected + 1;
    let coverage_pct = series.len() as f64 / expected_bars as f64 * 100.0;

    Some(GapReport {
        total_bars: series.len(),
        expected_interval_secs: expected,
        gap_count,
        missing_bars,
        largest_gap,
        span_secs,
        coverage_pct,
    })
}
