//! CSV data loading implementation.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use fxsession_core::{Bar, BarSeries};
use log::{debug, info, warn};

use crate::error::DataError;
use crate::validation::validate_bar;
use crate::DataSource;

// `%.f` also accepts a missing fractional part
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y.%m.%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Shortest integer part read as a unix timestamp (1973-03-03 in seconds).
const UNIX_MIN_DIGITS: usize = 9;

/// Loads bar data from CSV files.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for CsvLoader {
    fn load(&self) -> anyhow::Result<BarSeries> {
        Ok(load_bars_from_csv(&self.path)?)
    }
}

/// Row counts collected while loading a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rows_read: usize,
    /// Rows with an empty field, unparsable timestamp or non-finite price.
    pub dropped: usize,
    /// Later rows sharing a timestamp with an earlier one.
    pub duplicates: usize,
    /// Kept rows failing [`validate_bar`].
    pub suspicious: usize,
}

impl LoadSummary {
    pub fn bars_kept(&self) -> usize {
        self.rows_read - self.dropped - self.duplicates
    }
}

/// Parse a datetime string or a unix timestamp in seconds or milliseconds.
///
/// Calendar formats win over numbers, so "20240102" is a date. RFC 3339
/// offsets are dropped and the wall-clock time written in the file is kept.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
        .or_else(|| parse_unix(s))
        .or_else(|| {
            DATE_FORMATS.iter().find_map(|fmt| {
                NaiveDate::parse_from_str(s, fmt)
                    .ok()
                    .map(|d| d.and_time(NaiveTime::MIN))
            })
        })
}

// e.g. "1704186000", "1704186000.5" or "1704186000000"
fn parse_unix(s: &str) -> Option<NaiveDateTime> {
    let integer = s.split_once('.').map_or(s, |(int, _)| int);
    if integer.len() < UNIX_MIN_DIGITS || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let ts: f64 = s.parse().ok()?;
    let millis = if ts > 1e12 { ts } else { ts * 1000.0 };
    DateTime::from_timestamp_millis(millis.round() as i64).map(|dt| dt.naive_utc())
}

/// Column positions resolved from the header row.
struct Columns {
    timestamp: usize,
    prices: [(usize, &'static str); 4],
    volume: Option<usize>,
}

impl Columns {
    fn detect(headers: &csv::StringRecord) -> Self {
        let lower: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| lower.iter().position(|h| h == name);

        let timestamp = lower
            .iter()
            .position(|h| matches!(h.as_str(), "datetime" | "date" | "time") || h.contains("timestamp"))
            .unwrap_or(0);
        let volume = find("volume").or(if lower.len() > 5 { Some(5) } else { None });

        Self {
            timestamp,
            prices: [
                (find("open").unwrap_or(1), "Open"),
                (find("high").unwrap_or(2), "High"),
                (find("low").unwrap_or(3), "Low"),
                (find("close").unwrap_or(4), "Close"),
            ],
            volume,
        }
    }
}

/// Load bars from a CSV file and log a load summary.
///
/// Expects a header row. Columns are located by name, falling back to the
/// `datetime,Open,High,Low,Close,Volume` positions.
pub fn load_bars_from_csv<P: AsRef<Path>>(path: P) -> Result<BarSeries, DataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (series, summary) = parse_bars(file)?;

    info!(
        "loaded {} bars from {} ({} rows read, {} dropped, {} duplicate, {} suspicious)",
        series.len(),
        path.display(),
        summary.rows_read,
        summary.dropped,
        summary.duplicates,
        summary.suspicious,
    );
    Ok(series)
}

/// Parse bars from any CSV reader.
///
/// Rows with an empty field, an unparsable timestamp or a non-finite price are
/// dropped. A non-numeric price aborts with [`DataError::MalformedPrice`].
/// Rows are sorted by timestamp and the first row of each timestamp is kept.
pub fn parse_bars<R: Read>(reader: R) -> Result<(BarSeries, LoadSummary), DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::detect(reader.headers()?);
    let mut summary = LoadSummary::default();
    let mut bars = Vec::new();

    for result in reader.records() {
        let record = result?;
        summary.rows_read += 1;
        let line = record.position().map_or(0, |p| p.line());

        match parse_record(&record, &columns, line)? {
            Some(bar) => bars.push(bar),
            None => summary.dropped += 1,
        }
    }

    // Stable sort keeps file order among equal timestamps
    bars.sort_by_key(|b| b.timestamp);
    let before = bars.len();
    bars.dedup_by_key(|b| b.timestamp);
    summary.duplicates = before - bars.len();

    summary.suspicious = bars.iter().filter(|b| !validate_bar(b)).count();
    if summary.dropped > 0 {
        warn!("dropped {} incomplete or unparsable rows", summary.dropped);
    }
    if summary.suspicious > 0 {
        warn!(
            "{} bars violate OHLC ordering or have negative volume",
            summary.suspicious
        );
    }

    if summary.rows_read > 0 && bars.is_empty() {
        return Err(DataError::NoValidRows {
            rows_read: summary.rows_read,
        });
    }

    let series = BarSeries::new(bars)?;
    Ok((series, summary))
}

fn field(record: &csv::StringRecord, col: usize) -> Option<&str> {
    record.get(col).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_number(value: &str, line: u64, column: &str) -> Result<f64, DataError> {
    value.parse().map_err(|_| DataError::MalformedPrice {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// `Ok(None)` means the row is dropped.
fn parse_record(
    record: &csv::StringRecord,
    columns: &Columns,
    line: u64,
) -> Result<Option<Bar>, DataError> {
    let Some(raw_ts) = field(record, columns.timestamp) else {
        return Ok(None);
    };
    let mut raw_prices = [""; 4];
    for (slot, &(col, _)) in raw_prices.iter_mut().zip(columns.prices.iter()) {
        match field(record, col) {
            Some(value) => *slot = value,
            None => return Ok(None),
        }
    }
    let raw_volume = match columns.volume {
        Some(col) => match field(record, col) {
            Some(value) => Some(value),
            None => return Ok(None),
        },
        None => None,
    };

    let Some(timestamp) = parse_datetime(raw_ts) else {
        debug!("line {}: unparsable timestamp {:?}", line, raw_ts);
        return Ok(None);
    };

    let mut prices = [0.0; 4];
    for (price, (raw, &(_, name))) in prices
        .iter_mut()
        .zip(raw_prices.iter().zip(columns.prices.iter()))
    {
        *price = parse_number(raw, line, name)?;
    }
    let volume = match raw_volume {
        Some(raw) => parse_number(raw, line, "Volume")?,
        None => 0.0,
    };

    let [open, high, low, close] = prices;
    let bar = Bar::new(timestamp, open, high, low, close, volume);
    if !bar.is_finite() {
        debug!("line {}: non-finite value", line);
        return Ok(None);
    }
    Ok(Some(bar))
}
