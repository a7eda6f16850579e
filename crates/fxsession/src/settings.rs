//! Maps the file configuration onto analyzer sessions.

use fxsession_config::{AnalysisConfig, ChangeDetectionKind, Config, ConfigError};
use fxsession_ta::{AnalyzerConfig, ChangeDetection, SessionConfig, SessionParams};

pub fn session_params(analysis: &AnalysisConfig) -> SessionParams {
    let change_detection = match analysis.change_detection {
        ChangeDetectionKind::Exact => ChangeDetection::Exact,
        ChangeDetectionKind::Tolerance => ChangeDetection::Tolerance(analysis.tolerance),
    };
    SessionParams {
        extrema_period: analysis.extrema_period,
        fibonacci_period: analysis.fibonacci_period,
        change_detection,
    }
}

/// Validate `config` and build the analyzer configuration, in file order.
pub fn analyzer_config(config: &Config) -> Result<AnalyzerConfig, ConfigError> {
    let sessions = config
        .resolve_sessions()?
        .into_iter()
        .map(|s| SessionConfig::new(s.name, s.window).with_params(session_params(&s.analysis)))
        .collect();
    Ok(AnalyzerConfig::new(sessions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_sessions() {
        let from_file = analyzer_config(&Config::default()).unwrap();
        assert_eq!(from_file, AnalyzerConfig::default());
    }

    #[test]
    fn test_tolerance_and_overrides() {
        let mut config = Config::default();
        config.analysis.change_detection = ChangeDetectionKind::Tolerance;
        config.analysis.tolerance = 1e-5;
        config.sessions[1].overrides.fibonacci_period = Some(30);

        let analyzer = analyzer_config(&config).unwrap();
        let europe = analyzer.get("Europe").unwrap();
        assert_eq!(europe.params.fibonacci_period, 30);
        assert_eq!(europe.params.extrema_period, 14);
        assert_eq!(europe.params.change_detection, ChangeDetection::Tolerance(1e-5));
        assert_eq!(analyzer.get("Tokyo").unwrap().params.fibonacci_period, 14);
    }
}
