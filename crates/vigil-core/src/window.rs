//! Recency windows for browsing reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::records::CrimeReport;

const HOUR_MS: i64 = 60 * 60 * 1000;

/// How far back a report listing reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    #[default]
    All,
    LastHour,
    Last24Hours,
    LastWeek,
}

impl TimeWindow {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::LastHour => "1h",
            Self::Last24Hours => "24h",
            Self::LastWeek => "week",
        }
    }

    /// Earliest timestamp (epoch millis) kept by this window. `All` keeps
    /// everything.
    #[must_use]
    pub const fn cutoff(self, now_ms: i64) -> i64 {
        match self {
            Self::All => i64::MIN,
            Self::LastHour => now_ms - HOUR_MS,
            Self::Last24Hours => now_ms - 24 * HOUR_MS,
            Self::LastWeek => now_ms - 7 * 24 * HOUR_MS,
        }
    }

    #[must_use]
    pub const fn contains(self, timestamp_ms: i64, now_ms: i64) -> bool {
        timestamp_ms >= self.cutoff(now_ms)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "1h" | "hour" => Ok(Self::LastHour),
            "24h" | "day" => Ok(Self::Last24Hours),
            "week" | "7d" => Ok(Self::LastWeek),
            other => Err(format!(
                "unknown time window '{other}' (expected all, 1h, 24h, or week)"
            )),
        }
    }
}

/// Keep the reports that fall inside `window`, preserving input order.
#[must_use]
pub fn filter_reports(reports: &[CrimeReport], window: TimeWindow, now_ms: i64) -> Vec<CrimeReport> {
    reports
        .iter()
        .filter(|r| window.contains(r.timestamp, now_ms))
        .cloned()
        .collect()
}

/// A citizen's own reports (case-insensitive email match), newest first.
#[must_use]
pub fn reports_for_email(reports: &[CrimeReport], email: &str) -> Vec<CrimeReport> {
    let email = email.trim();
    let mut mine: Vec<CrimeReport> = reports
        .iter()
        .filter(|r| {
            r.email
                .as_deref()
                .is_some_and(|e| e.trim().eq_ignore_ascii_case(email))
        })
        .cloned()
        .collect();
    mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    mine
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const NOW: i64 = 1_750_000_000_000;

    fn report(id: &str, email: Option<&str>, age_ms: i64) -> CrimeReport {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "email": email,
            "description": "test",
            "timestamp": NOW - age_ms,
        }))
        .unwrap()
    }

    #[rstest]
    #[case("all", TimeWindow::All)]
    #[case("1h", TimeWindow::LastHour)]
    #[case("24h", TimeWindow::Last24Hours)]
    #[case("WEEK", TimeWindow::LastWeek)]
    fn parses_window(#[case] input: &str, #[case] expected: TimeWindow) {
        assert_eq!(input.parse::<TimeWindow>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_window() {
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }

    #[rstest]
    #[case(TimeWindow::All, vec!["a", "b", "c", "d"])]
    #[case(TimeWindow::LastHour, vec!["a"])]
    #[case(TimeWindow::Last24Hours, vec!["a", "b"])]
    #[case(TimeWindow::LastWeek, vec!["a", "b", "c"])]
    fn filters_by_window(#[case] window: TimeWindow, #[case] expected: Vec<&str>) {
        let reports = vec![
            report("a", None, 10 * 60 * 1000),
            report("b", None, 5 * HOUR_MS),
            report("c", None, 3 * 24 * HOUR_MS),
            report("d", None, 30 * 24 * HOUR_MS),
        ];
        let kept = filter_reports(&reports, window, NOW);
        let ids: Vec<&str> = kept.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        assert!(TimeWindow::LastHour.contains(NOW - HOUR_MS, NOW));
        assert!(!TimeWindow::LastHour.contains(NOW - HOUR_MS - 1, NOW));
    }

    #[test]
    fn email_filter_is_case_insensitive_and_newest_first() {
        let reports = vec![
            report("old", Some("Asha@Example.com"), 2 * HOUR_MS),
            report("other", Some("someone@example.com"), HOUR_MS),
            report("new", Some("asha@example.com"), 60 * 1000),
            report("anon", None, 1000),
        ];
        let mine = reports_for_email(&reports, "asha@example.com");
        let ids: Vec<&str> = mine.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }
}
