//! Configuration types for the session analyzer.

use fxsession_core::SessionWindow;
use fxsession_indicators::DEFAULT_PERIOD;
use serde::{Deserialize, Serialize};

/// How two consecutive rolling values are judged to differ.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ChangeDetection {
    /// Bit-exact comparison. Floating-point noise counts as a change.
    #[default]
    Exact,
    /// Changed only when the values differ by more than the tolerance.
    Tolerance(f64),
}

impl ChangeDetection {
    #[inline]
    pub fn changed(&self, previous: f64, current: f64) -> bool {
        match *self {
            ChangeDetection::Exact => previous != current,
            ChangeDetection::Tolerance(eps) => (previous - current).abs() > eps,
        }
    }
}

/// Per-session analysis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Lookback for the rolling extrema that replace raw high/low.
    pub extrema_period: usize,
    /// Lookback for the rolling pair feeding the Fibonacci levels.
    pub fibonacci_period: usize,
    /// Change rule used by the pivot run counter.
    pub change_detection: ChangeDetection,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            extrema_period: DEFAULT_PERIOD,
            fibonacci_period: DEFAULT_PERIOD,
            change_detection: ChangeDetection::Exact,
        }
    }
}

/// A named session window with its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub name: String,
    pub window: SessionWindow,
    pub params: SessionParams,
}

impl SessionConfig {
    /// Create a session with default parameters.
    pub fn new(name: impl Into<String>, window: SessionWindow) -> Self {
        Self {
            name: name.into(),
            window,
            params: SessionParams::default(),
        }
    }

    /// Replace the parameters of this session.
    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = params;
        self
    }
}

/// Global analyzer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Sessions to analyze. Names are unique.
    pub sessions: Vec<SessionConfig>,
}

impl AnalyzerConfig {
    /// Create a configuration. A later session replaces an earlier one with
    /// the same name.
    pub fn new(sessions: Vec<SessionConfig>) -> Self {
        sessions
            .into_iter()
            .fold(Self { sessions: Vec::new() }, Self::with_session)
    }

    /// Add a session, replacing any session with the same name.
    pub fn with_session(mut self, session: SessionConfig) -> Self {
        match self.sessions.iter_mut().find(|s| s.name == session.name) {
            Some(existing) => *existing = session,
            None => self.sessions.push(session),
        }
        self
    }

    /// Get the configuration for a session by name.
    pub fn get(&self, name: &str) -> Option<&SessionConfig> {
        self.sessions.iter().find(|s| s.name == name)
    }

    /// Keep only the named sessions.
    pub fn retain_sessions(mut self, names: &[String]) -> Self {
        self.sessions.retain(|s| names.contains(&s.name));
        self
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for AnalyzerConfig {
    /// Tokyo, Europe and New York, the last one wrapping midnight.
    fn default() -> Self {
        Self::new(default_sessions())
    }
}

/// The three default market sessions.
pub fn default_sessions() -> Vec<SessionConfig> {
    let window = |start, end| SessionWindow::from_hm(start, end).expect("valid session time");
    vec![
        SessionConfig::new("Tokyo", window((8, 30), (15, 0))),
        SessionConfig::new("Europe", window((15, 0), (21, 0))),
        SessionConfig::new("New York", window((21, 0), (2, 0))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_detection_sees_noise() {
        let a = 0.1 + 0.2;
        let b = 0.3;
        assert!(ChangeDetection::Exact.changed(a, b));
        assert!(!ChangeDetection::Tolerance(1e-12).changed(a, b));
        assert!(ChangeDetection::Tolerance(1e-12).changed(1.2, 1.2001));
        assert!(!ChangeDetection::Exact.changed(1.2, 1.2));
    }

    #[test]
    fn test_default_sessions() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.len(), 3);

        let ny = config.get("New York").unwrap();
        assert!(ny.window.wraps_midnight());
        assert_eq!(ny.params.extrema_period, 14);
        assert_eq!(ny.params.fibonacci_period, 14);
        assert_eq!(ny.params.change_detection, ChangeDetection::Exact);
    }

    #[test]
    fn test_same_name_replaces() {
        let window = SessionWindow::from_hm((0, 0), (1, 0)).unwrap();
        let other = SessionWindow::from_hm((1, 0), (2, 0)).unwrap();
        let config = AnalyzerConfig::new(vec![
            SessionConfig::new("A", window),
            SessionConfig::new("B", window),
            SessionConfig::new("A", other),
        ]);

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("A").unwrap().window, other);
        assert_eq!(config.sessions[0].name, "A");
    }

    #[test]
    fn test_retain_sessions() {
        let config = AnalyzerConfig::default().retain_sessions(&["Europe".to_string()]);
        assert_eq!(config.len(), 1);
        assert!(config.get("Tokyo").is_none());
    }
}
