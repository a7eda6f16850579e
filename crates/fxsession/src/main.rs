//! fxsession - per-session price statistics for OHLCV bar files.

mod report;
mod settings;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use fxsession_config::Config;
use fxsession_data::{analyze_gaps, CsvLoader, DataSource};
use fxsession_ta::{Analyzer, CsvExporter, Exporter, SessionAnalyzer};

#[derive(Parser)]
#[command(
    name = "fxsession",
    version,
    about = "Pivot run lengths, pip ranges and Fibonacci levels per trading session"
)]
struct Cli {
    /// CSV file with datetime, Open, High, Low, Close, Volume columns
    csv: PathBuf,

    /// Path to the TOML config.
    /// If omitted, ./fxsession.toml then the user config directory are tried
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print session summaries as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Write <session>_fibonacci.csv files into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Only analyze the named session (repeatable)
    #[arg(long = "session", value_name = "NAME")]
    sessions: Vec<String>,
}

fn run() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_default()?,
    };
    let mut analyzer_config = settings::analyzer_config(&config)?;
    if !cli.sessions.is_empty() {
        if let Some(unknown) = cli.sessions.iter().find(|n| analyzer_config.get(n).is_none()) {
            bail!("unknown session {unknown:?}");
        }
        analyzer_config = analyzer_config.retain_sessions(&cli.sessions);
    }

    let series = CsvLoader::new(&cli.csv)
        .load()
        .with_context(|| format!("failed to load {}", cli.csv.display()))?;
    if let Some(gaps) = analyze_gaps(&series) {
        gaps.log();
    }

    let analyzer = SessionAnalyzer::new(analyzer_config);
    let report = analyzer.analyze(&series);

    if cli.json {
        println!("{}", report::to_json(&report, analyzer.config())?);
    } else {
        print!("{}", report::render_table(&report, analyzer.config()));
    }

    if let Some(dir) = &cli.export_dir {
        let paths = CsvExporter::new(dir)
            .export_report(&report)
            .with_context(|| format!("failed to export to {}", dir.display()))?;
        log::info!("exported {} fibonacci files", paths.len());
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
