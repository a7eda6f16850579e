//! Export module for per-session Fibonacci series.
//!
//! Writes the five aligned retracement series of each session to a CSV file
//! so an external tool can plot them.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fxsession_indicators::FibonacciRatio;
use thiserror::Error;

use crate::analyzer::{SessionReport, SessionResult};

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("sessions '{first}' and '{second}' would both be written to {}", path.display())]
    PathCollision {
        first: String,
        second: String,
        path: PathBuf,
    },
}

/// Trait for session result exporters.
pub trait Exporter {
    /// Export one session, returning the path written.
    fn export_session(&self, result: &SessionResult) -> Result<PathBuf, ExportError>;

    /// Export every session of a report.
    fn export_report(&self, report: &SessionReport) -> Result<Vec<PathBuf>, ExportError> {
        report.values().map(|r| self.export_session(r)).collect()
    }
}

/// Writes `<dir>/<session>_fibonacci.csv` files.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// File path used for a session name.
    pub fn path_for(&self, session_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_fibonacci.csv", file_stem(session_name)))
    }
}

impl Exporter for CsvExporter {
    fn export_session(&self, result: &SessionResult) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(&result.name);
        let file = fs::File::create(&path)?;
        write_fibonacci_csv(file, result)?;
        log::info!("wrote {} fibonacci rows to {}", result.timestamps.len(), path.display());
        Ok(path)
    }

    /// Export every session, refusing to start when two names share a file.
    fn export_report(&self, report: &SessionReport) -> Result<Vec<PathBuf>, ExportError> {
        let mut seen: HashMap<PathBuf, &str> = HashMap::new();
        for name in report.keys() {
            let path = self.path_for(name);
            if let Some(first) = seen.insert(path.clone(), name) {
                return Err(ExportError::PathCollision {
                    first: first.to_string(),
                    second: name.clone(),
                    path,
                });
            }
        }
        report.values().map(|r| self.export_session(r)).collect()
    }
}

/// Write the datetime column and the five levels of `result` as CSV.
///
/// Absent values are written as empty cells.
pub fn write_fibonacci_csv<W: Write>(writer: W, result: &SessionResult) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["datetime"];
    header.extend(FibonacciRatio::ALL.iter().map(|r| r.label()));
    wtr.write_record(&header)?;

    for (i, ts) in result.timestamps.iter().enumerate() {
        let mut row = Vec::with_capacity(FibonacciRatio::ALL.len() + 1);
        row.push(ts.format("%Y-%m-%d %H:%M:%S").to_string());
        for ratio in FibonacciRatio::ALL {
            row.push(
                result
                    .fibonacci
                    .level(ratio)
                    .value(i)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Lowercase, filesystem-friendly version of a session name.
///
/// Letters and digits of any script are kept; everything else becomes `_`.
fn file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            stem.extend(c.to_lowercase());
        } else {
            stem.push('_');
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fxsession_core::{SessionWindow, TimeSeries};
    use fxsession_indicators::{FibonacciLevels, RollingExtrema};

    use crate::analyzer::SessionStatus;

    fn result_with_levels() -> SessionResult {
        let window = SessionWindow::from_hm((21, 0), (2, 0)).unwrap();
        let mut result = SessionResult::no_data("New York", window, SessionStatus::Analyzed);
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        result.timestamps = vec![
            ts.and_hms_opt(21, 0, 0).unwrap(),
            ts.and_hms_opt(22, 0, 0).unwrap(),
        ];
        let extrema = RollingExtrema {
            period: 2,
            high: TimeSeries::from_options(vec![None, Some(2.0)]),
            low: TimeSeries::from_options(vec![None, Some(1.0)]),
        };
        result.fibonacci = FibonacciLevels::from_extrema(&extrema);
        result
    }

    #[test]
    fn test_csv_layout() {
        let mut buf = Vec::new();
        write_fibonacci_csv(&mut buf, &result_with_levels()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "datetime,Fibo 23.6%,Fibo 38.2%,Fibo 50.0%,Fibo 61.8%,Fibo 100%"
        );
        assert_eq!(lines[1], "2024-01-02 21:00:00,,,,,");
        assert_eq!(lines.len(), 3);

        let fields: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(fields[0], "2024-01-02 22:00:00");
        let values: Vec<f64> = fields[1..].iter().map(|f| f.parse().unwrap()).collect();
        for (value, expected) in values.iter().zip([1.236, 1.382, 1.5, 1.618, 2.0]) {
            assert!((value - expected).abs() < 1e-12, "{} vs {}", value, expected);
        }
    }

    #[test]
    fn test_path_for_session() {
        let exporter = CsvExporter::new("/tmp/out");
        assert_eq!(
            exporter.path_for("New York"),
            PathBuf::from("/tmp/out/new_york_fibonacci.csv")
        );
    }

    #[test]
    fn test_path_for_non_ascii_sessions() {
        let exporter = CsvExporter::new("/tmp/out");
        assert_eq!(
            exporter.path_for("東京"),
            PathBuf::from("/tmp/out/東京_fibonacci.csv")
        );
        assert_ne!(exporter.path_for("東京"), exporter.path_for("大阪"));
        assert_eq!(
            exporter.path_for("Zürich"),
            PathBuf::from("/tmp/out/zürich_fibonacci.csv")
        );
    }

    #[test]
    fn test_export_report_rejects_colliding_names() {
        let dir = std::env::temp_dir().join(format!("fxsession-collide-{}", std::process::id()));
        let exporter = CsvExporter::new(&dir);

        let mut report = SessionReport::new();
        let mut second = result_with_levels();
        second.name = "new-york".to_string();
        report.insert("New York".to_string(), result_with_levels());
        report.insert("new-york".to_string(), second);

        match exporter.export_report(&report) {
            Err(ExportError::PathCollision { first, second, path }) => {
                assert_eq!(first, "New York");
                assert_eq!(second, "new-york");
                assert_eq!(path, dir.join("new_york_fibonacci.csv"));
            }
            other => panic!("expected a path collision, got {:?}", other),
        }
        assert!(!dir.exists());
    }
}
