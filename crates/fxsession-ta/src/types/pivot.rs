//! Pivot runs - bars between changes of the rolling extrema.

use fxsession_core::HighLow;
use serde::Serialize;

use super::config::ChangeDetection;

/// Which rolling extremum last changed and opened the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PivotAnchor {
    High,
    Low,
}

/// A completed run of bars during which neither rolling extremum changed.
///
/// The run opens at the bar where its anchor changed and closes on the bar
/// before the next change of the opposite extremum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PivotRun {
    /// Anchor that opened this run.
    pub anchor: PivotAnchor,
    /// Index of the bar that set the anchor (inclusive).
    pub start_index: usize,
    /// Last bar before the closing change (inclusive).
    pub end_index: usize,
    /// Number of compared bars in the run.
    pub length: usize,
}

/// Incremental pivot run counter.
///
/// Feed rolling high/low pairs in index order with [`PivotRunCounter::process`].
/// A change of the rolling high closes the current run only if the run was
/// opened by a low change, and vice versa. The first anchor therefore never
/// closes a run, and repeated changes on the same side restart the count
/// without emitting anything.
#[derive(Debug)]
pub struct PivotRunCounter {
    detection: ChangeDetection,
    previous: Option<(f64, f64)>,
    anchor: Option<(PivotAnchor, usize)>,
    count: usize,
}

impl PivotRunCounter {
    pub fn new(detection: ChangeDetection) -> Self {
        Self {
            detection,
            previous: None,
            anchor: None,
            count: 0,
        }
    }

    /// Process the rolling `(high, low)` at `index`.
    ///
    /// Returns `Some(PivotRun)` when this bar closes a run. An absent pair
    /// resets the comparison so the next defined bar is not compared.
    pub fn process(&mut self, index: usize, pair: Option<(f64, f64)>) -> Option<PivotRun> {
        let Some((high, low)) = pair else {
            self.previous = None;
            return None;
        };
        let (prev_high, prev_low) = self.previous.replace((high, low))?;

        if self.detection.changed(prev_high, high) {
            self.reanchor(PivotAnchor::High, index)
        } else if self.detection.changed(prev_low, low) {
            self.reanchor(PivotAnchor::Low, index)
        } else {
            self.count += 1;
            None
        }
    }

    fn reanchor(&mut self, anchor: PivotAnchor, index: usize) -> Option<PivotRun> {
        let closed = match self.anchor {
            Some((open, start_index)) if open != anchor => Some(PivotRun {
                anchor: open,
                start_index,
                end_index: index - 1,
                length: self.count,
            }),
            _ => None,
        };
        self.anchor = Some((anchor, index));
        self.count = 1;
        closed
    }
}

/// All completed runs of a series and their mean length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotRunSummary {
    pub runs: Vec<PivotRun>,
    /// Mean run length, 0 when no run completed.
    pub average: f64,
}

impl PivotRunSummary {
    pub fn from_runs(runs: Vec<PivotRun>) -> Self {
        let average = if runs.is_empty() {
            0.0
        } else {
            runs.iter().map(|r| r.length).sum::<usize>() as f64 / runs.len() as f64
        };
        Self { runs, average }
    }
}

/// Walk a rolling extrema series once and collect its pivot runs.
pub fn count_pivot_runs<S>(extrema: &S, detection: ChangeDetection) -> PivotRunSummary
where
    S: HighLow + ?Sized,
{
    let mut counter = PivotRunCounter::new(detection);
    let runs = (0..extrema.len())
        .filter_map(|i| counter.process(i, extrema.high_low_at(i)))
        .collect();
    PivotRunSummary::from_runs(runs)
}
