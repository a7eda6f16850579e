//! Text and JSON rendering of a session report.

use std::fmt::Write;

use fxsession_ta::{AnalyzerConfig, SessionReport, SessionResult, SessionStatus, SessionSummary};

const HEADERS: [&str; 7] = [
    "Session",
    "Window",
    "Bars",
    "Pivot runs",
    "Avg run",
    "Avg range (pips)",
    "Status",
];

/// Results in configuration order.
fn ordered<'a>(
    report: &'a SessionReport,
    config: &'a AnalyzerConfig,
) -> impl Iterator<Item = &'a SessionResult> {
    config.sessions.iter().filter_map(|s| report.get(&s.name))
}

fn status_label(status: &SessionStatus) -> String {
    match status {
        SessionStatus::Analyzed => "ok".to_string(),
        SessionStatus::Empty => "empty".to_string(),
        SessionStatus::Failed { reason } => format!("failed: {reason}"),
    }
}

fn row(result: &SessionResult) -> [String; 7] {
    [
        result.name.clone(),
        result.window.to_string(),
        result.bar_count.to_string(),
        result.pivot_runs.len().to_string(),
        format!("{:.2}", result.average_pivot_run_length),
        result
            .average_range_pips
            .map_or_else(|| "no data".to_string(), |pips| format!("{pips:.1}")),
        status_label(&result.status),
    ]
}

/// Render an aligned plain-text table.
pub fn render_table(report: &SessionReport, config: &AnalyzerConfig) -> String {
    let rows: Vec<[String; 7]> = ordered(report, config).map(row).collect();

    // `{:<width$}` pads by chars, so widths are char counts
    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[&str]| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    };

    push_line(&HEADERS);
    for cells in &rows {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        push_line(&cells);
    }
    out
}

/// Session summaries as a pretty-printed JSON array.
pub fn to_json(report: &SessionReport, config: &AnalyzerConfig) -> serde_json::Result<String> {
    let summaries: Vec<SessionSummary> = ordered(report, config).map(SessionResult::summary).collect();
    serde_json::to_string_pretty(&summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxsession_core::SessionWindow;
    use fxsession_ta::{default_sessions, SessionConfig};

    fn report() -> (SessionReport, AnalyzerConfig) {
        let config = AnalyzerConfig::default();
        let mut report = SessionReport::new();
        for session in &config.sessions {
            let status = if session.name == "Europe" {
                SessionStatus::Failed {
                    reason: "invalid period: 0".to_string(),
                }
            } else {
                SessionStatus::Empty
            };
            report.insert(
                session.name.clone(),
                SessionResult::no_data(&session.name, session.window, status),
            );
        }
        let tokyo = report.get_mut("Tokyo").unwrap();
        tokyo.status = SessionStatus::Analyzed;
        tokyo.bar_count = 40;
        tokyo.average_range_pips = Some(12.345);
        (report, config)
    }

    #[test]
    fn test_table_follows_config_order() {
        let (report, config) = report();
        let table = render_table(&report, &config);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Session"));
        assert!(lines[1].starts_with("Tokyo"));
        assert!(lines[2].starts_with("Europe"));
        assert!(lines[3].starts_with("New York"));

        assert!(lines[1].contains("12.3"));
        assert!(lines[1].ends_with("ok"));
        assert!(lines[2].contains("no data"));
        assert!(lines[2].ends_with("failed: invalid period: 0"));
        assert!(lines[3].contains("[21:00, 02:00)"));
        assert!(lines[3].ends_with("empty"));
    }

    #[test]
    fn test_sessions_missing_from_report_are_skipped() {
        let (report, _) = report();
        let window = SessionWindow::from_hm((0, 0), (1, 0)).unwrap();
        let config = AnalyzerConfig::new(default_sessions())
            .with_session(SessionConfig::new("Sydney", window));

        let table = render_table(&report, &config);
        assert!(!table.contains("Sydney"));
    }

    #[test]
    fn test_table_widths_count_chars() {
        let window = SessionWindow::from_hm((0, 0), (9, 0)).unwrap();
        let config = AnalyzerConfig::new(vec![
            SessionConfig::new("東京市場", window),
            SessionConfig::new("Europe", window),
        ]);
        let mut report = SessionReport::new();
        for session in &config.sessions {
            report.insert(
                session.name.clone(),
                SessionResult::no_data(&session.name, session.window, SessionStatus::Empty),
            );
        }

        let table = render_table(&report, &config);
        let columns: Vec<usize> = table
            .lines()
            .map(|line| {
                let marker = if line.starts_with("Session") { "Window" } else { "[" };
                line[..line.find(marker).unwrap()].chars().count()
            })
            .collect();

        // "Session" is the widest cell of the first column
        assert_eq!(columns, vec![9, 9, 9]);
    }

    #[test]
    fn test_json_summaries() {
        let (report, config) = report();
        let json: serde_json::Value = serde_json::from_str(&to_json(&report, &config).unwrap()).unwrap();
        let sessions = json.as_array().unwrap();

        assert_eq!(sessions.len(), 3);
        assert_eq!(sessions[0]["name"], "Tokyo");
        assert_eq!(sessions[0]["status"], "analyzed");
        assert_eq!(sessions[0]["bar_count"], 40);
        assert_eq!(sessions[1]["status"], "failed");
        assert_eq!(sessions[1]["reason"], "invalid period: 0");
        assert!(sessions[2]["average_range_pips"].is_null());
    }
}
