//! Time-range restriction on `start_time`.

use crate::error::{LogscopeError, Result};
use crate::model::LogEntry;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use std::fmt;
use std::str::FromStr;

const PRESETS: [(&str, i64); 5] = [("1h", 1), ("6h", 6), ("24h", 24), ("7d", 24 * 7), ("30d", 24 * 30)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    /// Entries started within the given number of hours before the reference instant.
    Last { hours: i64 },
    /// Entries started inside the inclusive bounds; a missing bound is open.
    Custom {
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    },
}

impl TimeWindow {
    pub fn custom(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let bound = |raw: Option<&str>| -> Result<Option<NaiveDateTime>> {
            raw.map(|s| {
                parse_timestamp(s)
                    .ok_or_else(|| LogscopeError::Api(format!("Invalid timestamp: {}", s)))
            })
            .transpose()
        };
        Ok(TimeWindow::Custom {
            start: bound(start)?,
            end: bound(end)?,
        })
    }

    pub fn is_bounded(&self) -> bool {
        !matches!(self, TimeWindow::All)
    }

    /// Whether `entry` falls inside the window. `now` anchors the relative presets.
    pub fn contains(&self, entry: &LogEntry, now: NaiveDateTime) -> bool {
        if !self.is_bounded() {
            return true;
        }
        let Some(started) = parse_timestamp(&entry.start_time) else {
            return false;
        };
        match *self {
            TimeWindow::All => true,
            TimeWindow::Last { hours } => started >= now - TimeDelta::hours(hours),
            TimeWindow::Custom { start, end } => {
                start.map_or(true, |s| started >= s) && end.map_or(true, |e| started <= e)
            }
        }
    }
}

impl FromStr for TimeWindow {
    type Err = LogscopeError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(TimeWindow::All);
        }
        PRESETS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, hours)| TimeWindow::Last { hours: *hours })
            .ok_or_else(|| {
                LogscopeError::Api(format!(
                    "Unknown time window: {} (expected 1h, 6h, 24h, 7d, 30d or all)",
                    s
                ))
            })
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::All => write!(f, "all"),
            TimeWindow::Last { hours } => match PRESETS.iter().find(|(_, h)| h == hours) {
                Some((name, _)) => write!(f, "{}", name),
                None => write!(f, "{}h", hours),
            },
            TimeWindow::Custom { start, end } => {
                let show = |b: &Option<NaiveDateTime>| {
                    b.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| "..".to_string())
                };
                write!(f, "{} - {}", show(start), show(end))
            }
        }
    }
}

/// Parses the timestamp shapes recorders write. Offsets are dropped and the
/// wall-clock time is kept.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t);
        }
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> LogEntry {
        LogEntry {
            start_time: ts.to_string(),
            ..LogEntry::default()
        }
    }

    fn now() -> NaiveDateTime {
        parse_timestamp("2024-05-10T12:00:00").unwrap()
    }

    #[test]
    fn parses_recorder_timestamps() {
        assert!(parse_timestamp("2024-05-10T12:00:00.123456").is_some());
        assert!(parse_timestamp("2024-05-10 12:00:00").is_some());
        assert!(parse_timestamp("2024-05-10T12:00:00+02:00").is_some());
        assert!(parse_timestamp("2024-05-10").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn all_keeps_unparseable_entries() {
        assert!(TimeWindow::All.contains(&at("garbage"), now()));
    }

    #[test]
    fn presets_are_relative_to_now() {
        let window: TimeWindow = "1h".parse().unwrap();
        assert!(window.contains(&at("2024-05-10T11:30:00"), now()));
        assert!(!window.contains(&at("2024-05-10T10:30:00"), now()));

        let window: TimeWindow = "7d".parse().unwrap();
        assert!(window.contains(&at("2024-05-04T12:00:00"), now()));
        assert!(!window.contains(&at("2024-05-01T12:00:00"), now()));
    }

    #[test]
    fn bounded_windows_drop_unparseable_entries() {
        let window: TimeWindow = "30d".parse().unwrap();
        assert!(!window.contains(&at(""), now()));
    }

    #[test]
    fn custom_bounds_are_inclusive_and_optional() {
        let window = TimeWindow::custom(Some("2024-05-01 00:00:00"), Some("2024-05-02")).unwrap();
        assert!(window.contains(&at("2024-05-01T00:00:00"), now()));
        assert!(window.contains(&at("2024-05-02T00:00:00"), now()));
        assert!(!window.contains(&at("2024-05-02T00:00:01"), now()));

        let open_end = TimeWindow::custom(Some("2024-05-01"), None).unwrap();
        assert!(open_end.contains(&at("2030-01-01T00:00:00"), now()));
    }

    #[test]
    fn rejects_unknown_presets_and_bad_bounds() {
        assert!("2h".parse::<TimeWindow>().is_err());
        assert!(TimeWindow::custom(Some("soon"), None).is_err());
    }

    #[test]
    fn displays_presets_by_name() {
        assert_eq!(TimeWindow::Last { hours: 168 }.to_string(), "7d");
        assert_eq!(TimeWindow::All.to_string(), "all");
    }
}
