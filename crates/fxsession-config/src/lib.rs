//! Configuration management for fxsession.
//!
//! Loads configuration from TOML files with support for per-session analysis
//! parameters.

use chrono::NaiveTime;
use fxsession_core::SessionWindow;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("session {session:?}: invalid time {value:?}, expected HH:MM or HH:MM:SS")]
    InvalidTime { session: String, value: String },
    #[error("session {0:?} is defined more than once")]
    DuplicateSession(String),
    #[error("session {session:?}: {field} must be at least 1")]
    InvalidPeriod { session: String, field: &'static str },
    #[error("session {session:?}: tolerance must be a finite, non-negative number")]
    InvalidTolerance { session: String },
}

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parse a `HH:MM` or `HH:MM:SS` time of day.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub sessions: Vec<SessionEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            sessions: vec![
                SessionEntry::new("Tokyo", "08:30", "15:00"),
                SessionEntry::new("Europe", "15:00", "21:00"),
                SessionEntry::new("New York", "21:00", "02:00"),
            ],
        }
    }
}

impl Config {
    /// Load and validate configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./fxsession.toml`
    /// 2. `~/.config/fxsession/config.toml`
    ///
    /// Returns default config if no file is found. A file that exists but
    /// fails to load is an error.
    pub fn load_default() -> Result<Self, ConfigError> {
        let mut candidates = vec![Self::default_path()];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("fxsession").join("config.toml"));
        }

        for path in candidates {
            if path.is_file() {
                log::debug!("using config {}", path.display());
                return Self::load(&path);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("fxsession.toml")
    }

    /// Get analysis parameters for a specific session.
    /// Falls back to the global parameters if the session is not configured.
    pub fn analysis_for_session(&self, name: &str) -> AnalysisConfig {
        self.sessions
            .iter()
            .find(|s| s.name == name)
            .map(|s| self.analysis.merge(&s.overrides))
            .unwrap_or_else(|| self.analysis.clone())
    }

    /// Check every session for valid times, unique names and valid parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_sessions().map(|_| ())
    }

    /// Sessions with parsed windows and merged parameters, in file order.
    pub fn resolve_sessions(&self) -> Result<Vec<ResolvedSession>, ConfigError> {
        let mut seen = HashSet::new();
        self.sessions
            .iter()
            .map(|entry| {
                if !seen.insert(entry.name.as_str()) {
                    return Err(ConfigError::DuplicateSession(entry.name.clone()));
                }
                let resolved = ResolvedSession {
                    name: entry.name.clone(),
                    window: entry.window()?,
                    analysis: self.analysis.merge(&entry.overrides),
                };
                resolved.analysis.check(&entry.name)?;
                Ok(resolved)
            })
            .collect()
    }
}

/// How consecutive rolling values are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDetectionKind {
    #[default]
    Exact,
    Tolerance,
}

/// Analysis parameters (full config with all fields).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Lookback of the rolling extrema that replace raw high/low.
    pub extrema_period: usize,
    /// Lookback of the rolling extrema behind the Fibonacci levels.
    pub fibonacci_period: usize,
    pub change_detection: ChangeDetectionKind,
    /// Used when `change_detection = "tolerance"`.
    pub tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            extrema_period: 14,
            fibonacci_period: 14,
            change_detection: ChangeDetectionKind::Exact,
            tolerance: 1e-9,
        }
    }
}

impl AnalysisConfig {
    /// Merge with an override, using override values where present.
    pub fn merge(&self, override_config: &AnalysisOverride) -> Self {
        Self {
            extrema_period: override_config.extrema_period.unwrap_or(self.extrema_period),
            fibonacci_period: override_config.fibonacci_period.unwrap_or(self.fibonacci_period),
            change_detection: override_config.change_detection.unwrap_or(self.change_detection),
            tolerance: override_config.tolerance.unwrap_or(self.tolerance),
        }
    }

    fn check(&self, session: &str) -> Result<(), ConfigError> {
        for (field, value) in [
            ("extrema_period", self.extrema_period),
            ("fibonacci_period", self.fibonacci_period),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidPeriod {
                    session: session.to_string(),
                    field,
                });
            }
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance {
                session: session.to_string(),
            });
        }
        Ok(())
    }
}

/// Analysis override (all fields optional for partial overrides).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extrema_period: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fibonacci_period: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_detection: Option<ChangeDetectionKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

/// One `[[sessions]]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub name: String,
    /// Inclusive start, `HH:MM` or `HH:MM:SS`.
    pub start: String,
    /// Exclusive end. An end before the start wraps past midnight.
    pub end: String,
    #[serde(flatten)]
    pub overrides: AnalysisOverride,
}

impl SessionEntry {
    pub fn new(name: &str, start: &str, end: &str) -> Self {
        Self {
            name: name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            overrides: AnalysisOverride::default(),
        }
    }

    /// Parse the start/end strings into a window.
    pub fn window(&self) -> Result<SessionWindow, ConfigError> {
        let time = |value: &str| {
            parse_time(value).ok_or_else(|| ConfigError::InvalidTime {
                session: self.name.clone(),
                value: value.to_string(),
            })
        };
        Ok(SessionWindow::new(time(&self.start)?, time(&self.end)?))
    }
}

/// A validated session ready for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSession {
    pub name: String,
    pub window: SessionWindow,
    pub analysis: AnalysisConfig,
}
